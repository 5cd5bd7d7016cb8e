//! Waitlist domain service implementing the join and listing use cases.
//!
//! Duplicate detection is a pair of sequential lookups followed by an insert.
//! Two concurrent signups with the same email can both pass the checks; the
//! data store is the only place a unique constraint could close that gap.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    WaitlistCommand, WaitlistQuery, WaitlistRepository, WaitlistRepositoryError,
};
use crate::domain::{Error, WaitlistEntry, WaitlistSignup};

pub const EMAIL_TAKEN_MESSAGE: &str = "Email already registered in waitlist";
pub const USERNAME_TAKEN_MESSAGE: &str = "Username already registered in waitlist";

/// Waitlist service backed by a [`WaitlistRepository`].
#[derive(Clone)]
pub struct WaitlistService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> WaitlistService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_repository_error(error: WaitlistRepositoryError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R: ?Sized> WaitlistCommand for WaitlistService<R>
where
    R: WaitlistRepository,
{
    async fn join(&self, signup: WaitlistSignup) -> Result<WaitlistEntry, Error> {
        let email = signup.email().as_str();
        if self
            .repo
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            warn!(email, "waitlist signup rejected: email already registered");
            return Err(Error::invalid_request(EMAIL_TAKEN_MESSAGE));
        }

        let username = signup.username().as_str();
        if self
            .repo
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?
            .is_some()
        {
            warn!(username, "waitlist signup rejected: username already registered");
            return Err(Error::invalid_request(USERNAME_TAKEN_MESSAGE));
        }

        let entry = self
            .repo
            .insert(&signup)
            .await
            .map_err(map_repository_error)?;
        info!(id = %entry.id, "joined waitlist");
        Ok(entry)
    }
}

#[async_trait]
impl<R: ?Sized> WaitlistQuery for WaitlistService<R>
where
    R: WaitlistRepository,
{
    async fn entries(&self) -> Result<Vec<WaitlistEntry>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockWaitlistRepository;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn signup() -> WaitlistSignup {
        WaitlistSignup::try_from_parts(Some("ada_l"), Some("ada@example.com"))
            .expect("valid signup")
    }

    fn entry(username: &str, email: &str) -> WaitlistEntry {
        WaitlistEntry {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.to_owned(),
            created_at: Utc::now(),
        }
    }

    fn make_service(repo: MockWaitlistRepository) -> WaitlistService<MockWaitlistRepository> {
        WaitlistService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn join_inserts_novel_signup(signup: WaitlistSignup) {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .return_once(|s| Ok(entry(s.username().as_str(), s.email().as_str())));

        let created = make_service(repo).join(signup).await.expect("join succeeds");
        assert_eq!(created.username, "ada_l");
        assert_eq!(created.email, "ada@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn join_rejects_registered_email_without_inserting(signup: WaitlistSignup) {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|email| Ok(Some(entry("someone_else", email))));
        repo.expect_find_by_username().never();
        repo.expect_insert().never();

        let err = make_service(repo).join(signup).await.expect_err("duplicate");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), EMAIL_TAKEN_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn join_rejects_registered_username_without_inserting(signup: WaitlistSignup) {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
        repo.expect_find_by_username()
            .times(1)
            .return_once(|username| Ok(Some(entry(username, "other@example.com"))));
        repo.expect_insert().never();

        let err = make_service(repo).join(signup).await.expect_err("duplicate");
        assert_eq!(err.message(), USERNAME_TAKEN_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn join_maps_store_failures_to_internal(signup: WaitlistSignup) {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Err(WaitlistRepositoryError::connection("refused")));

        let err = make_service(repo).join(signup).await.expect_err("store down");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn entries_passes_through_repository_order() {
        let mut repo = MockWaitlistRepository::new();
        repo.expect_list_newest_first().times(1).return_once(|| {
            Ok(vec![
                entry("newer", "newer@example.com"),
                entry("older", "older@example.com"),
            ])
        });

        let entries = make_service(repo).entries().await.expect("entries");
        let names: Vec<_> = entries.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["newer", "older"]);
    }
}
