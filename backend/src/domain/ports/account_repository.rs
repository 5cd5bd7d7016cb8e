//! Driven port for the service-owned `users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Account;

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// The data store could not be reached.
        Connection { message: String } => "account store connection failed: {message}",
        /// The data store rejected or failed the query.
        Query { message: String } => "account store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Account registered with `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError>;

    /// Create an account row.
    async fn insert(
        &self,
        email: &str,
        full_name: Option<String>,
    ) -> Result<Account, AccountRepositoryError>;

    /// Overwrite `full_name` and `updated_at` on an existing row.
    async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountRepositoryError>;
}

/// Stateless stand-in used when no data store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountRepository;

#[async_trait]
impl AccountRepository for FixtureAccountRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        email: &str,
        full_name: Option<String>,
    ) -> Result<Account, AccountRepositoryError> {
        Ok(Account {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            full_name,
            updated_at: Some(Utc::now()),
        })
    }

    async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountRepositoryError> {
        Err(AccountRepositoryError::query(format!(
            "fixture cannot update account {id} ({full_name:?} at {updated_at})"
        )))
    }
}
