//! User-facing entities: identities, profiles and service accounts.
//!
//! `VerifiedIdentity` comes from the identity provider, `Profile` rows are
//! owned by the external data store and `Account` rows are this service's own
//! per-email record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty once trimmed.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
}

/// Identity-provider user identifier.
///
/// # Examples
/// ```
/// use waitlist_backend::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = "uuid")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from text.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// User returned by the identity provider for a verified bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerifiedIdentity {
    /// Identity-provider user id.
    pub id: UserId,
    /// Primary email, absent for phone-only identities.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata supplied by the sign-in provider.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub user_metadata: Map<String, Value>,
}

impl VerifiedIdentity {
    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }

    /// `full_name` from the provider metadata.
    pub fn full_name(&self) -> Option<&str> {
        self.metadata_str("full_name")
    }

    /// `avatar_url` from the provider metadata.
    pub fn avatar_url(&self) -> Option<&str> {
        self.metadata_str("avatar_url")
    }
}

/// Row of the external `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Profile derived from a freshly verified identity.
    ///
    /// The username defaults to the local part of the email address.
    pub fn from_identity(identity: &VerifiedIdentity) -> Self {
        let username = identity
            .email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .map(str::to_owned);
        Self {
            id: identity.id,
            username,
            full_name: identity.full_name().map(str::to_owned),
            avatar_url: identity.avatar_url().map(str::to_owned),
            email: identity.email.clone(),
            updated_at: None,
        }
    }
}

/// Service-owned row of the `users` table, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller resolved by the bearer middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    identity: VerifiedIdentity,
    account: Account,
}

impl AuthenticatedUser {
    /// Pair a verified identity with its synchronised account.
    pub fn new(identity: VerifiedIdentity, account: Account) -> Self {
        Self { identity, account }
    }

    /// Identity-provider view of the caller.
    pub fn identity(&self) -> &VerifiedIdentity {
        &self.identity
    }

    /// Service account of the caller.
    pub fn account(&self) -> &Account {
        &self.account
    }
}
