//! Driven port for the Instagram business login flow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::define_port_error;

define_port_error! {
    /// Errors raised by OAuth provider adapters.
    pub enum SocialOAuthError {
        /// OAuth endpoint answered with an `OAuthException`.
        Authorization { message: String } => "Instagram OAuth Error: {message}",
        /// Graph API rejected a token exchange.
        TokenExchange { message: String } => "Instagram Token Exchange Error: {message}",
        /// Graph API rejected a token refresh.
        TokenRefresh { message: String } => "Instagram Token Refresh Error: {message}",
        /// Graph API rejected a profile lookup.
        Profile { message: String } => "Instagram Profile Error: {message}",
        /// The provider could not be reached.
        Transport { message: String } => "Instagram request failed: {message}",
        /// The provider answered with a body we could not read.
        Decode { message: String } => "Instagram response could not be decoded: {message}",
    }
}

/// Result of exchanging an authorization code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLivedToken {
    pub access_token: Zeroizing<String>,
    pub user_id: String,
    pub permissions: Vec<String>,
}

/// Long-lived token returned by the exchange and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongLivedToken {
    pub access_token: Zeroizing<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// Business profile of the linked account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub follows_count: Option<u64>,
    #[serde(default)]
    pub media_count: Option<u64>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialOAuthProvider: Send + Sync {
    /// URL the browser visits to grant access.
    fn authorization_url(&self) -> Result<String, SocialOAuthError>;

    /// Trade an authorization code for a short-lived token.
    async fn exchange_code(&self, code: &str) -> Result<ShortLivedToken, SocialOAuthError>;

    /// Business profile visible to `access_token`.
    async fn fetch_profile(&self, access_token: &str) -> Result<SocialProfile, SocialOAuthError>;

    /// Trade a short-lived token for a long-lived one.
    async fn long_lived_token(&self, short_lived: &str)
    -> Result<LongLivedToken, SocialOAuthError>;

    /// Extend a long-lived token.
    async fn refresh_long_lived_token(
        &self,
        long_lived: &str,
    ) -> Result<LongLivedToken, SocialOAuthError>;
}

/// Stand-in used when no Instagram app is configured.
///
/// Every call fails, so no client is sent to a placeholder login page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSocialOAuthProvider;

impl FixtureSocialOAuthProvider {
    fn unavailable() -> SocialOAuthError {
        SocialOAuthError::authorization("Instagram integration is not configured")
    }
}

#[async_trait]
impl SocialOAuthProvider for FixtureSocialOAuthProvider {
    fn authorization_url(&self) -> Result<String, SocialOAuthError> {
        Err(Self::unavailable())
    }

    async fn exchange_code(&self, _code: &str) -> Result<ShortLivedToken, SocialOAuthError> {
        Err(Self::unavailable())
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<SocialProfile, SocialOAuthError> {
        Err(Self::unavailable())
    }

    async fn long_lived_token(
        &self,
        _short_lived: &str,
    ) -> Result<LongLivedToken, SocialOAuthError> {
        Err(Self::unavailable())
    }

    async fn refresh_long_lived_token(
        &self,
        _long_lived: &str,
    ) -> Result<LongLivedToken, SocialOAuthError> {
        Err(Self::unavailable())
    }
}
