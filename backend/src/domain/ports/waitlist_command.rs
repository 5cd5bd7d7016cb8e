//! Driving ports for the waitlist use cases.

use async_trait::async_trait;

use crate::domain::{Error, WaitlistEntry, WaitlistSignup};

/// Register a new signup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaitlistCommand: Send + Sync {
    /// Store `signup` unless its email or username is already taken.
    async fn join(&self, signup: WaitlistSignup) -> Result<WaitlistEntry, Error>;
}

/// Read the waitlist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WaitlistQuery: Send + Sync {
    /// Every entry, newest first.
    async fn entries(&self) -> Result<Vec<WaitlistEntry>, Error>;
}
