//! Driven port for the externally owned `profiles` table.

use async_trait::async_trait;

use crate::domain::{Profile, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The data store could not be reached.
        Connection { message: String } => "profile store connection failed: {message}",
        /// The data store rejected or failed the query.
        Query { message: String } => "profile store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Every profile, most recently updated first.
    async fn list_recently_updated(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Profile with the given id, if any.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert or merge a profile keyed by `id`, returning the stored row.
    async fn upsert(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError>;
}

/// Stateless stand-in used when no data store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn list_recently_updated(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, ProfileRepositoryError> {
        Ok(profile.clone())
    }
}
