//! Reqwest-backed identity provider.
//!
//! Tokens are verified by asking `{base}/auth/v1/user` who they belong to;
//! 401 and 403 mean the token is not valid. Sign-in URLs point at
//! `{base}/auth/v1/authorize`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{BearerToken, SignInProvider, SignInUrl, VerifiedIdentity};

/// Identity provider adapter for one project.
pub struct GoTrueIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl GoTrueIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let full = format!("{}/auth/v1/{path}", url.path().trim_end_matches('/'));
        url.set_path(&full);
        url
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn verify(&self, token: &BearerToken) -> Result<VerifiedIdentity, IdentityProviderError> {
        debug!(token = %token.fingerprint(), "verifying token with identity provider");
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", self.api_key.as_str())
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|error| IdentityProviderError::connection(error.to_string()))?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(IdentityProviderError::invalid_token());
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| IdentityProviderError::connection(error.to_string()))?;
        if !status.is_success() {
            return Err(IdentityProviderError::upstream(format!(
                "status {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body).trim()
            )));
        }
        serde_json::from_slice(&body).map_err(|error| {
            IdentityProviderError::upstream(format!("invalid user payload: {error}"))
        })
    }

    fn sign_in_url(
        &self,
        provider: SignInProvider,
        redirect_to: &str,
    ) -> Result<SignInUrl, IdentityProviderError> {
        let mut url = self.endpoint("authorize");
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(SignInUrl {
            provider,
            url: url.into(),
        })
    }
}
