//! Driven port for the `waitlist` table.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{WaitlistEntry, WaitlistSignup};

use super::define_port_error;

define_port_error! {
    /// Errors raised by waitlist repository adapters.
    pub enum WaitlistRepositoryError {
        /// The data store could not be reached.
        Connection { message: String } => "waitlist store connection failed: {message}",
        /// The data store rejected or failed the query.
        Query { message: String } => "waitlist store query failed: {message}",
    }
}

/// Persistence operations behind the waitlist use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Entry registered with `email`, if any.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError>;

    /// Entry registered with `username`, if any.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError>;

    /// Store a new signup and return the created row.
    async fn insert(&self, signup: &WaitlistSignup)
    -> Result<WaitlistEntry, WaitlistRepositoryError>;

    /// All entries, newest first.
    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, WaitlistRepositoryError>;
}

/// Stateless stand-in used when no data store is configured.
///
/// Lookups never match and inserts are echoed back without being kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWaitlistRepository;

#[async_trait]
impl WaitlistRepository for FixtureWaitlistRepository {
    async fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError> {
        Ok(None)
    }

    async fn find_by_username(
        &self,
        _username: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        signup: &WaitlistSignup,
    ) -> Result<WaitlistEntry, WaitlistRepositoryError> {
        Ok(WaitlistEntry {
            id: Uuid::new_v4(),
            username: signup.username().to_string(),
            email: signup.email().to_string(),
            created_at: Utc::now(),
        })
    }

    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, WaitlistRepositoryError> {
        Ok(Vec::new())
    }
}
