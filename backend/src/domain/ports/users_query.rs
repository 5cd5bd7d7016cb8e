//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to read profiles and the caller's own
//! details without importing data-store concerns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{AuthenticatedUser, ChannelView, Error, Profile};

/// The caller's identity metadata with their linked channels.
///
/// Metadata keys are flattened into the top level of the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
    pub channels: Vec<ChannelView>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every profile, most recently updated first.
    async fn list_users(&self) -> Result<Vec<Profile>, Error>;

    /// Details of the authenticated caller.
    async fn current_user(&self, user: &AuthenticatedUser) -> Result<CurrentUser, Error>;
}
