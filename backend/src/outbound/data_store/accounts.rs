//! `users` table adapter. Rows are keyed by email.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::client::{PostgrestClient, PostgrestError, eq};
use crate::domain::Account;
use crate::domain::ports::{AccountRepository, AccountRepositoryError};

const TABLE: &str = "users";

#[derive(Serialize)]
struct NewAccountRow<'a> {
    email: &'a str,
    full_name: Option<String>,
}

#[derive(Serialize)]
struct AccountChanges {
    full_name: Option<String>,
    updated_at: DateTime<Utc>,
}

fn map_error(error: PostgrestError) -> AccountRepositoryError {
    if error.is_transport() {
        AccountRepositoryError::connection(error.to_string())
    } else {
        AccountRepositoryError::query(error.to_string())
    }
}

/// Account repository over the data store's REST interface.
#[derive(Clone)]
pub struct PostgrestAccountRepository {
    client: Arc<PostgrestClient>,
}

impl PostgrestAccountRepository {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountRepository for PostgrestAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountRepositoryError> {
        self.client
            .select_one(TABLE, &[eq("email", email)])
            .await
            .map_err(map_error)
    }

    async fn insert(
        &self,
        email: &str,
        full_name: Option<String>,
    ) -> Result<Account, AccountRepositoryError> {
        self.client
            .insert(TABLE, &NewAccountRow { email, full_name })
            .await
            .map_err(map_error)
    }

    async fn update(
        &self,
        id: Uuid,
        full_name: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Account, AccountRepositoryError> {
        self.client
            .update(
                TABLE,
                &[eq("id", id)],
                &AccountChanges {
                    full_name,
                    updated_at,
                },
            )
            .await
            .map_err(map_error)
    }
}
