//! Driving ports for provider sign-in and profile lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BearerToken, Error, Profile, SignInUrl, UserId, VerifiedIdentity};

/// Outcome of a completed provider sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignInOutcome {
    pub user: VerifiedIdentity,
    pub profile: Profile,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInCommand: Send + Sync {
    /// Identity provider URL that starts a Google sign-in.
    async fn google_sign_in_url(&self) -> Result<SignInUrl, Error>;

    /// Verify the token issued after sign-in and refresh the caller's profile.
    async fn complete_sign_in(&self, token: &BearerToken) -> Result<SignInOutcome, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Profile of `user_id`; `NotFound` when absent.
    async fn profile(&self, user_id: &UserId) -> Result<Profile, Error>;
}
