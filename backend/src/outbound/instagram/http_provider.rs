//! Reqwest-backed Instagram provider.
//!
//! Owns transport details only: URL and form building, the request timeout,
//! error-body mapping and decoding into port types. Scope checks and the
//! link sequence live in the domain service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use zeroize::Zeroizing;

use super::dto::{ErrorBodyDto, LongLivedTokenDto, ProfileResponseDto, ShortLivedResponseDto};
use crate::domain::INSTAGRAM_SCOPES;
use crate::domain::ports::{
    LongLivedToken, ShortLivedToken, SocialOAuthError, SocialOAuthProvider, SocialProfile,
};

const DEFAULT_AUTHORIZE_URL: &str = "https://www.instagram.com/oauth/authorize";
const DEFAULT_OAUTH_BASE: &str = "https://api.instagram.com";
const DEFAULT_GRAPH_BASE: &str = "https://graph.instagram.com";
const GRAPH_API_VERSION: &str = "v19.0";
const PROFILE_FIELDS: &str = "id,user_id,username,name,account_type,profile_picture_url,followers_count,follows_count,media_count";

/// App credentials registered with Instagram.
pub struct InstagramCredentials {
    pub client_id: String,
    pub client_secret: Zeroizing<String>,
    pub redirect_uri: String,
}

/// Hosts the adapter talks to.
#[derive(Debug, Clone)]
pub struct InstagramEndpoints {
    /// Browser-facing consent page.
    pub authorize_url: Url,
    /// Host of `/oauth/access_token`.
    pub oauth_base: Url,
    /// Host of the Graph API.
    pub graph_base: Url,
}

impl InstagramEndpoints {
    /// Instagram's production hosts.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the constants are valid URLs.
    pub fn production() -> Result<Self, url::ParseError> {
        Ok(Self {
            authorize_url: Url::parse(DEFAULT_AUTHORIZE_URL)?,
            oauth_base: Url::parse(DEFAULT_OAUTH_BASE)?,
            graph_base: Url::parse(DEFAULT_GRAPH_BASE)?,
        })
    }

    /// Point the OAuth and Graph hosts at one base URL.
    pub fn single_host(base: &Url) -> Self {
        Self {
            authorize_url: with_path(base, "/oauth/authorize"),
            oauth_base: base.clone(),
            graph_base: base.clone(),
        }
    }
}

fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let full = format!("{}{path}", url.path().trim_end_matches('/'));
    url.set_path(&full);
    url
}

/// Instagram adapter over one reqwest client.
pub struct InstagramHttpProvider {
    client: Client,
    credentials: InstagramCredentials,
    endpoints: InstagramEndpoints,
}

impl InstagramHttpProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        credentials: InstagramCredentials,
        endpoints: InstagramEndpoints,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            credentials,
            endpoints,
        })
    }

    async fn graph_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        on_error: fn(String) -> SocialOAuthError,
    ) -> Result<T, SocialOAuthError> {
        let response = self
            .client
            .get(with_path(&self.endpoints.graph_base, path))
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response, on_error).await
    }
}

#[async_trait]
impl SocialOAuthProvider for InstagramHttpProvider {
    fn authorization_url(&self) -> Result<String, SocialOAuthError> {
        let mut url = self.endpoints.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.redirect_uri)
            .append_pair("scope", &INSTAGRAM_SCOPES.join(","))
            .append_pair("response_type", "code")
            .append_pair("enable_fb_login", "0")
            .append_pair("force_authentication", "1");
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<ShortLivedToken, SocialOAuthError> {
        debug!("exchanging instagram authorization code");
        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ("code", code),
        ];
        let response = self
            .client
            .post(with_path(&self.endpoints.oauth_base, "/oauth/access_token"))
            .form(&form)
            .send()
            .await
            .map_err(map_transport_error)?;
        let dto: ShortLivedResponseDto = read_json(response, SocialOAuthError::authorization).await?;
        dto.into_domain().map_err(SocialOAuthError::decode)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<SocialProfile, SocialOAuthError> {
        let path = format!("/{GRAPH_API_VERSION}/me");
        let dto: ProfileResponseDto = self
            .graph_get(
                &path,
                &[("fields", PROFILE_FIELDS), ("access_token", access_token)],
                SocialOAuthError::profile,
            )
            .await?;
        Ok(dto.into_domain())
    }

    async fn long_lived_token(
        &self,
        short_lived: &str,
    ) -> Result<LongLivedToken, SocialOAuthError> {
        debug!("exchanging for long-lived instagram token");
        let dto: LongLivedTokenDto = self
            .graph_get(
                "/access_token",
                &[
                    ("grant_type", "ig_exchange_token"),
                    ("client_secret", self.credentials.client_secret.as_str()),
                    ("access_token", short_lived),
                ],
                SocialOAuthError::token_exchange,
            )
            .await?;
        dto.into_domain().map_err(SocialOAuthError::decode)
    }

    async fn refresh_long_lived_token(
        &self,
        long_lived: &str,
    ) -> Result<LongLivedToken, SocialOAuthError> {
        debug!("refreshing long-lived instagram token");
        let dto: LongLivedTokenDto = self
            .graph_get(
                "/refresh_access_token",
                &[
                    ("grant_type", "ig_refresh_token"),
                    ("access_token", long_lived),
                ],
                SocialOAuthError::token_refresh,
            )
            .await?;
        dto.into_domain().map_err(SocialOAuthError::decode)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    on_error: fn(String) -> SocialOAuthError,
) -> Result<T, SocialOAuthError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        let mapped = map_error_body(status.as_u16(), body.as_ref(), on_error);
        error!(status = status.as_u16(), error = %mapped, "instagram request failed");
        return Err(mapped);
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|error| SocialOAuthError::decode(format!("invalid Instagram JSON: {error}")))
}

/// `OAuthException` bodies win; Graph `error.message` goes through
/// `on_error`; anything else is reported with its status.
fn map_error_body(
    status: u16,
    body: &[u8],
    on_error: fn(String) -> SocialOAuthError,
) -> SocialOAuthError {
    let parsed: ErrorBodyDto = serde_json::from_slice(body).unwrap_or_default();
    if let Some(message) = parsed.oauth_exception() {
        return SocialOAuthError::authorization(message);
    }
    if let Some(message) = parsed.graph_message() {
        return on_error(message.to_owned());
    }
    on_error(format!(
        "status {status}: {}",
        String::from_utf8_lossy(body).trim()
    ))
}

fn map_transport_error(error: reqwest::Error) -> SocialOAuthError {
    SocialOAuthError::transport(error.to_string())
}
