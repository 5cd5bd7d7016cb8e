//! Waitlist signup primitives.
//!
//! Validation mirrors the public signup form: every rule is checked and all
//! violations are reported together so clients can highlight each field.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Error, FieldError};

/// Minimum username length in characters.
pub const USERNAME_MIN: usize = 2;
/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 254;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[a-zA-Z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// A single rule broken by a signup payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitlistValidationError {
    /// Username missing or empty.
    #[error("Username is required")]
    UsernameRequired,
    /// Username shorter than [`USERNAME_MIN`].
    #[error("Username must be at least {min} characters long")]
    UsernameTooShort { min: usize },
    /// Username longer than [`USERNAME_MAX`].
    #[error("Username cannot exceed {max} characters")]
    UsernameTooLong { max: usize },
    /// Username contains characters outside `[a-zA-Z0-9_]`.
    #[error("Username can only contain letters, numbers and underscores")]
    UsernameInvalidCharacters,
    /// Email missing or empty.
    #[error("Email is required")]
    EmailRequired,
    /// Email is not a syntactically valid address.
    #[error("Please provide a valid email address")]
    EmailInvalid,
}

impl WaitlistValidationError {
    /// Request field the violation belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::UsernameRequired
            | Self::UsernameTooShort { .. }
            | Self::UsernameTooLong { .. }
            | Self::UsernameInvalidCharacters => "username",
            Self::EmailRequired | Self::EmailInvalid => "email",
        }
    }
}

impl From<WaitlistValidationError> for FieldError {
    fn from(value: WaitlistValidationError) -> Self {
        FieldError::new(value.field(), value.to_string())
    }
}

/// Validated waitlist username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Username(String);

impl Username {
    /// Validate a raw username, returning the first violation.
    pub fn new(raw: impl Into<String>) -> Result<Self, WaitlistValidationError> {
        let raw = raw.into();
        match Self::violations(&raw).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(Self(raw)),
        }
    }

    /// Every rule `raw` breaks, in declaration order.
    pub fn violations(raw: &str) -> Vec<WaitlistValidationError> {
        if raw.is_empty() {
            return vec![WaitlistValidationError::UsernameRequired];
        }

        let mut violations = Vec::new();
        let length = raw.chars().count();
        if length < USERNAME_MIN {
            violations.push(WaitlistValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            violations.push(WaitlistValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(raw) {
            violations.push(WaitlistValidationError::UsernameInvalidCharacters);
        }
        violations
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Syntactically valid email address.
///
/// # Examples
/// ```
/// use waitlist_backend::domain::EmailAddress;
///
/// assert!(EmailAddress::new("ada@example.com").is_ok());
/// assert!(EmailAddress::new("ada@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate a raw email address.
    pub fn new(raw: impl Into<String>) -> Result<Self, WaitlistValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(WaitlistValidationError::EmailRequired);
        }
        if raw.len() > EMAIL_MAX || !email_regex().is_match(&raw) || !Self::well_formed(&raw) {
            return Err(WaitlistValidationError::EmailInvalid);
        }
        Ok(Self(raw))
    }

    fn well_formed(raw: &str) -> bool {
        let Some((local, domain)) = raw.rsplit_once('@') else {
            return false;
        };
        let tld_ok = domain
            .rsplit('.')
            .next()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
        tld_ok && !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Part before the `@`, used as a default handle.
    pub fn local_part(&self) -> &str {
        self.0
            .rsplit_once('@')
            .map_or(self.0.as_str(), |(local, _)| local)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validated `{username, email}` pair ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistSignup {
    username: Username,
    email: EmailAddress,
}

impl WaitlistSignup {
    /// Build a signup from already validated parts.
    pub fn new(username: Username, email: EmailAddress) -> Self {
        Self { username, email }
    }

    /// Validate raw request fields, collecting every violation.
    pub fn try_from_parts(
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, Vec<WaitlistValidationError>> {
        let mut violations = Username::violations(username.unwrap_or_default());
        let email = EmailAddress::new(email.unwrap_or_default());
        if let Err(violation) = &email {
            violations.push(*violation);
        }

        match (violations.is_empty(), email) {
            (true, Ok(email)) => Ok(Self {
                username: Username(username.unwrap_or_default().to_owned()),
                email,
            }),
            _ => Err(violations),
        }
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Turn collected violations into a `400 Validation failed` domain error.
pub fn validation_failed(violations: Vec<WaitlistValidationError>) -> Error {
    Error::invalid_request("Validation failed")
        .with_errors(violations.into_iter().map(FieldError::from).collect())
}

/// Stored waitlist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WaitlistEntry {
    /// Row identifier assigned by the data store.
    #[schema(value_type = String, example = "0b6f1c8e-3f2a-4c55-9a3e-5c1f5e6d7a8b")]
    pub id: Uuid,
    /// Requested username.
    #[schema(example = "ada_l")]
    pub username: String,
    /// Contact email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Insertion timestamp assigned by the data store.
    #[schema(value_type = String, example = "2024-05-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}
