//! Driving port used by the bearer middleware.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, BearerToken, Error};

/// Resolve a bearer token into an authenticated caller.
///
/// Implementations verify the token with the identity provider and make sure
/// the caller's service account exists before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BearerAuthenticator: Send + Sync {
    async fn authenticate(&self, token: &BearerToken) -> Result<AuthenticatedUser, Error>;
}
