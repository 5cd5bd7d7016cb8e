//! Authentication primitives: bearer tokens and sign-in URLs.
//!
//! Tokens are held in zeroizing storage and never logged; use
//! [`BearerToken::fingerprint`] when a log line needs to correlate requests.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use zeroize::Zeroizing;

const FINGERPRINT_LEN: usize = 12;

/// Reasons an `Authorization` header cannot yield a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthHeaderError {
    /// No `Authorization` header was sent.
    #[error("No authorization header")]
    Missing,
    /// The header carried no token after the scheme.
    #[error("No token provided")]
    EmptyToken,
    /// The header used a scheme other than `Bearer`.
    #[error("Invalid token")]
    UnsupportedScheme,
}

/// Opaque bearer token presented by a client.
///
/// # Examples
/// ```
/// use waitlist_backend::domain::BearerToken;
///
/// let token = BearerToken::from_header(Some("Bearer abc.def")).expect("token");
/// assert_eq!(token.expose(), "abc.def");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Extract the token from an `Authorization` header value.
    pub fn from_header(header: Option<&str>) -> Result<Self, AuthHeaderError> {
        let header = header.ok_or(AuthHeaderError::Missing)?;
        let mut parts = header.split_whitespace();
        let scheme = parts.next().ok_or(AuthHeaderError::EmptyToken)?;
        let token = parts.next().ok_or(AuthHeaderError::EmptyToken)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthHeaderError::UnsupportedScheme);
        }
        Ok(Self::new(token))
    }

    /// Raw token value for forwarding to the identity provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 prefix safe to include in logs.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        encoded
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&self.fingerprint()).finish()
    }
}

/// Third-party sign-in providers offered by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SignInProvider {
    Google,
}

impl SignInProvider {
    /// Provider name understood by the identity service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Where to send a browser to start a provider sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignInUrl {
    pub provider: SignInProvider,
    #[schema(example = "https://project.supabase.co/auth/v1/authorize?provider=google")]
    pub url: String,
}
