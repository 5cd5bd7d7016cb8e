//! Driven port for the external identity provider.
//!
//! The provider owns sign-in and token issuance; this service only verifies
//! bearer tokens and builds provider sign-in URLs.

use async_trait::async_trait;

use crate::domain::{BearerToken, SignInProvider, SignInUrl, VerifiedIdentity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider rejected the token.
        InvalidToken => "identity provider rejected the token",
        /// The provider could not be reached.
        Connection { message: String } => "identity provider connection failed: {message}",
        /// The provider answered with an unexpected status or body.
        Upstream { message: String } => "identity provider error: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the user a bearer token was issued to.
    async fn verify(&self, token: &BearerToken) -> Result<VerifiedIdentity, IdentityProviderError>;

    /// Authorization URL that starts an OAuth sign-in with `provider` and
    /// returns the browser to `redirect_to`.
    fn sign_in_url(
        &self,
        provider: SignInProvider,
        redirect_to: &str,
    ) -> Result<SignInUrl, IdentityProviderError>;
}

/// Stand-in used when no identity provider is configured.
///
/// Every token is rejected so protected routes stay closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify(
        &self,
        _token: &BearerToken,
    ) -> Result<VerifiedIdentity, IdentityProviderError> {
        Err(IdentityProviderError::InvalidToken)
    }

    fn sign_in_url(
        &self,
        provider: SignInProvider,
        redirect_to: &str,
    ) -> Result<SignInUrl, IdentityProviderError> {
        let mut url = url::Url::parse("http://localhost:54321/auth/v1/authorize")
            .map_err(|err| IdentityProviderError::upstream(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        Ok(SignInUrl {
            provider,
            url: url.into(),
        })
    }
}
