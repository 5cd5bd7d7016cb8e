//! `waitlist` table adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use super::client::{PostgrestClient, PostgrestError, eq, order_desc};
use crate::domain::ports::{WaitlistRepository, WaitlistRepositoryError};
use crate::domain::{WaitlistEntry, WaitlistSignup};

const TABLE: &str = "waitlist";

#[derive(Serialize)]
struct NewWaitlistRow<'a> {
    username: &'a str,
    email: &'a str,
}

fn map_error(error: PostgrestError) -> WaitlistRepositoryError {
    if error.is_transport() {
        WaitlistRepositoryError::connection(error.to_string())
    } else {
        WaitlistRepositoryError::query(error.to_string())
    }
}

/// Waitlist repository over the data store's REST interface.
#[derive(Clone)]
pub struct PostgrestWaitlistRepository {
    client: Arc<PostgrestClient>,
}

impl PostgrestWaitlistRepository {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WaitlistRepository for PostgrestWaitlistRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError> {
        self.client
            .select_one(TABLE, &[eq("email", email)])
            .await
            .map_err(map_error)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<WaitlistEntry>, WaitlistRepositoryError> {
        self.client
            .select_one(TABLE, &[eq("username", username)])
            .await
            .map_err(map_error)
    }

    async fn insert(
        &self,
        signup: &WaitlistSignup,
    ) -> Result<WaitlistEntry, WaitlistRepositoryError> {
        let row = NewWaitlistRow {
            username: signup.username().as_str(),
            email: signup.email().as_str(),
        };
        self.client.insert(TABLE, &row).await.map_err(map_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<WaitlistEntry>, WaitlistRepositoryError> {
        self.client
            .select(TABLE, &[order_desc("created_at")])
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::data_store::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn row(username: &str, email: &str) -> serde_json::Value {
        json!({
            "id": "0b6f1c8e-3f2a-4c55-9a3e-5c1f5e6d7a8b",
            "username": username,
            "email": email,
            "created_at": "2024-05-01T12:00:00.123456+00:00"
        })
    }

    #[tokio::test]
    async fn find_by_email_filters_on_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/waitlist"))
            .and(query_param("email", "eq.ada@example.com"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([row("ada", "ada@example.com")])),
            )
            .mount(&server)
            .await;
        let repo = PostgrestWaitlistRepository::new(client_for(&server));

        let entry = repo
            .find_by_email("ada@example.com")
            .await
            .expect("query")
            .expect("row");
        assert_eq!(entry.username, "ada");
    }

    #[tokio::test]
    async fn insert_posts_username_and_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/waitlist"))
            .and(body_json(json!({"username": "ada_l", "email": "ada@example.com"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([row("ada_l", "ada@example.com")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        let repo = PostgrestWaitlistRepository::new(client_for(&server));
        let signup = WaitlistSignup::try_from_parts(Some("ada_l"), Some("ada@example.com"))
            .expect("valid signup");

        let entry = repo.insert(&signup).await.expect("insert");
        assert_eq!(entry.email, "ada@example.com");
    }

    #[tokio::test]
    async fn list_orders_by_created_at_desc() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/waitlist"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        let repo = PostgrestWaitlistRepository::new(client_for(&server));

        assert!(repo.list_newest_first().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn server_errors_map_to_query_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/waitlist"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let repo = PostgrestWaitlistRepository::new(client_for(&server));

        let err = repo.list_newest_first().await.expect_err("failure");
        assert!(matches!(err, WaitlistRepositoryError::Query { .. }));
    }
}
