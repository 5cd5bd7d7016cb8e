//! Authentication domain services.
//!
//! [`BearerAuthService`] backs the bearer middleware: it verifies a token and
//! keeps the caller's `users` row in step with the identity provider.
//! [`SignInService`] backs the public auth endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, BearerAuthenticator, IdentityProvider,
    IdentityProviderError, ProfileQuery, ProfileRepository, SignInCommand, SignInOutcome,
};
use crate::domain::{
    Account, AuthenticatedUser, BearerToken, Error, Profile, SignInProvider, SignInUrl, UserId,
    VerifiedIdentity,
};

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";
pub const ACCOUNT_SYNC_FAILED_MESSAGE: &str = "Failed to process user data";
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Profile not found";

async fn verify_identity<I>(identity: &I, token: &BearerToken) -> Result<VerifiedIdentity, Error>
where
    I: IdentityProvider + ?Sized,
{
    identity.verify(token).await.map_err(|err| match err {
        IdentityProviderError::InvalidToken => {
            warn!(token = %token.fingerprint(), "bearer token rejected");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        }
        other => Error::internal(other.to_string()),
    })
}

/// Verifies bearer tokens and synchronises service accounts.
#[derive(Clone)]
pub struct BearerAuthService<I: ?Sized, A: ?Sized> {
    identity: Arc<I>,
    accounts: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<I: ?Sized, A: ?Sized> BearerAuthService<I, A> {
    pub fn new(identity: Arc<I>, accounts: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            identity,
            accounts,
            clock,
        }
    }
}

impl<I: ?Sized, A: ?Sized> BearerAuthService<I, A>
where
    A: AccountRepository,
{
    /// Create the `users` row for `email` or refresh the existing one.
    ///
    /// A missing `full_name` keeps whatever the row already holds.
    async fn sync_account(
        &self,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<Account, AccountRepositoryError> {
        match self.accounts.find_by_email(email).await? {
            Some(existing) => {
                let full_name = full_name.map(str::to_owned).or(existing.full_name);
                self.accounts
                    .update(existing.id, full_name, self.clock.utc())
                    .await
            }
            None => {
                debug!("creating account for first-time caller");
                self.accounts
                    .insert(email, full_name.map(str::to_owned))
                    .await
            }
        }
    }
}

#[async_trait]
impl<I: ?Sized, A: ?Sized> BearerAuthenticator for BearerAuthService<I, A>
where
    I: IdentityProvider,
    A: AccountRepository,
{
    async fn authenticate(&self, token: &BearerToken) -> Result<AuthenticatedUser, Error> {
        let identity = verify_identity(self.identity.as_ref(), token).await?;
        let Some(email) = identity.email.clone() else {
            warn!(user_id = %identity.id, "verified identity has no email");
            return Err(Error::unauthorized(INVALID_TOKEN_MESSAGE));
        };

        let account = self
            .sync_account(&email, identity.full_name())
            .await
            .map_err(|err| {
                error!(error = %err, user_id = %identity.id, "account sync failed");
                Error::internal(ACCOUNT_SYNC_FAILED_MESSAGE).exposed()
            })?;
        debug!(account_id = %account.id, "caller authenticated");
        Ok(AuthenticatedUser::new(identity, account))
    }
}

/// Provider sign-in and profile lookups.
#[derive(Clone)]
pub struct SignInService<I: ?Sized, P: ?Sized> {
    identity: Arc<I>,
    profiles: Arc<P>,
    client_url: String,
}

impl<I: ?Sized, P: ?Sized> SignInService<I, P> {
    /// `client_url` is the browser application origin that receives the
    /// provider redirect at `/auth/callback`.
    pub fn new(identity: Arc<I>, profiles: Arc<P>, client_url: impl Into<String>) -> Self {
        Self {
            identity,
            profiles,
            client_url: client_url.into(),
        }
    }

    fn callback_url(&self) -> String {
        format!("{}/auth/callback", self.client_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl<I: ?Sized, P: ?Sized> SignInCommand for SignInService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn google_sign_in_url(&self) -> Result<SignInUrl, Error> {
        self.identity
            .sign_in_url(SignInProvider::Google, &self.callback_url())
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn complete_sign_in(&self, token: &BearerToken) -> Result<SignInOutcome, Error> {
        let user = verify_identity(self.identity.as_ref(), token).await?;
        let profile = self
            .profiles
            .upsert(&Profile::from_identity(&user))
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(user_id = %user.id, "sign-in completed");
        Ok(SignInOutcome { user, profile })
    }
}

#[async_trait]
impl<I: ?Sized, P: ?Sized> ProfileQuery for SignInService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn profile(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.profiles
            .find_by_id(user_id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
            .ok_or_else(|| Error::not_found(PROFILE_NOT_FOUND_MESSAGE))
    }
}
