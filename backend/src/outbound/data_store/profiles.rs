//! `profiles` table adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::{PostgrestClient, PostgrestError, eq, order_desc};
use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, UserId};

const TABLE: &str = "profiles";

/// Upsert body; an unset `updated_at` is left to the data store.
#[derive(Serialize)]
struct ProfileRow<'a> {
    id: &'a UserId,
    username: Option<&'a str>,
    full_name: Option<&'a str>,
    avatar_url: Option<&'a str>,
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Profile> for ProfileRow<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            id: &profile.id,
            username: profile.username.as_deref(),
            full_name: profile.full_name.as_deref(),
            avatar_url: profile.avatar_url.as_deref(),
            email: profile.email.as_deref(),
            updated_at: profile.updated_at,
        }
    }
}

fn map_error(error: PostgrestError) -> ProfileRepositoryError {
    if error.is_transport() {
        ProfileRepositoryError::connection(error.to_string())
    } else {
        ProfileRepositoryError::query(error.to_string())
    }
}

/// Profile repository over the data store's REST interface.
#[derive(Clone)]
pub struct PostgrestProfileRepository {
    client: Arc<PostgrestClient>,
}

impl PostgrestProfileRepository {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for PostgrestProfileRepository {
    async fn list_recently_updated(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        self.client
            .select(TABLE, &[order_desc("updated_at")])
            .await
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        self.client
            .select_one(TABLE, &[eq("id", id)])
            .await
            .map_err(map_error)
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        self.client
            .upsert(TABLE, "id", &ProfileRow::from(profile))
            .await
            .map_err(map_error)
    }
}
