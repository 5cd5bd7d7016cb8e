//! Waitlist API handlers.
//!
//! ```text
//! POST /api/waitlist/join {"username":"ada_l","email":"ada@example.com"}
//! GET /api/waitlist/entries
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{WaitlistEntry, WaitlistSignup, validation_failed};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiEnvelope, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/waitlist/join`.
///
/// Fields are optional at the JSON layer so missing values are reported as
/// validation messages rather than deserialisation failures.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct JoinWaitlistRequest {
    #[schema(example = "ada_l")]
    pub username: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

/// Register a username and email on the waitlist.
#[utoipa::path(
    post,
    path = "/api/waitlist/join",
    request_body = JoinWaitlistRequest,
    responses(
        (status = 201, description = "Joined", body = ApiEnvelope<WaitlistEntry>),
        (status = 400, description = "Validation failed or already registered", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["waitlist"],
    operation_id = "joinWaitlist",
    security([])
)]
#[post("/join")]
pub async fn join_waitlist(
    state: web::Data<HttpState>,
    payload: web::Json<JoinWaitlistRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let signup =
        WaitlistSignup::try_from_parts(payload.username.as_deref(), payload.email.as_deref())
            .map_err(validation_failed)?;
    debug!(username = %signup.username(), "waitlist join requested");

    let entry = state.waitlist.join(signup).await?;
    Ok(ApiEnvelope::ok("Successfully joined waitlist", entry).respond(StatusCode::CREATED))
}

/// List waitlist entries, newest first.
#[utoipa::path(
    get,
    path = "/api/waitlist/entries",
    responses(
        (status = 200, description = "Entries", body = ApiEnvelope<Vec<WaitlistEntry>>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["waitlist"],
    operation_id = "listWaitlistEntries",
    security([])
)]
#[get("/entries")]
pub async fn list_entries(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let entries = state.waitlist_query.entries().await?;
    Ok(ApiEnvelope::ok("Waitlist entries retrieved successfully", entries).respond(StatusCode::OK))
}

/// Register the waitlist handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(join_waitlist).service(list_entries);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::{MockWaitlistCommand, MockWaitlistQuery};
    use crate::inbound::http::test_utils::{read_envelope, state_with};
    use actix_web::{App, test};
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use uuid::Uuid;

    fn app_state(command: MockWaitlistCommand, query: MockWaitlistQuery) -> HttpState {
        state_with(|state| {
            state.waitlist = Arc::new(command);
            state.waitlist_query = Arc::new(query);
        })
    }

    async fn call(state: HttpState, req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/waitlist").configure(configure)),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        (status, read_envelope(res).await)
    }

    fn join_request(body: Value) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/waitlist/join")
            .set_json(body)
    }

    #[actix_web::test]
    async fn join_returns_created_entry() {
        let mut command = MockWaitlistCommand::new();
        command.expect_join().times(1).return_once(|signup| {
            Ok(WaitlistEntry {
                id: Uuid::new_v4(),
                username: signup.username().to_string(),
                email: signup.email().to_string(),
                created_at: Utc::now(),
            })
        });

        let (status, body) = call(
            app_state(command, MockWaitlistQuery::new()),
            join_request(json!({"username": "ada_l", "email": "ada@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully joined waitlist");
        assert_eq!(body["data"]["username"], "ada_l");
        assert_eq!(body["data"]["email"], "ada@example.com");
    }

    #[rstest]
    #[case(json!({"username": "a", "email": "ada@example.com"}), "username", "Username must be at least 2 characters long")]
    #[case(json!({"username": "ada lovelace", "email": "ada@example.com"}), "username", "Username can only contain letters, numbers and underscores")]
    #[case(json!({"username": "abcdefghijabcdefghijabcdefghijk", "email": "ada@example.com"}), "username", "Username cannot exceed 30 characters")]
    #[case(json!({"username": "ada_l", "email": "not-an-email"}), "email", "Please provide a valid email address")]
    #[case(json!({"email": "ada@example.com"}), "username", "Username is required")]
    #[case(json!({"username": "ada_l", "email": ""}), "email", "Email is required")]
    #[actix_web::test]
    async fn join_rejects_invalid_payloads(
        #[case] payload: Value,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let mut command = MockWaitlistCommand::new();
        command.expect_join().never();

        let (status, body) = call(
            app_state(command, MockWaitlistQuery::new()),
            join_request(payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"][0]["field"], field);
        assert_eq!(body["errors"][0]["message"], message);
    }

    #[actix_web::test]
    async fn join_reports_every_violation() {
        let (status, body) = call(
            app_state(MockWaitlistCommand::new(), MockWaitlistQuery::new()),
            join_request(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn join_surfaces_duplicate_email() {
        let mut command = MockWaitlistCommand::new();
        command
            .expect_join()
            .return_once(|_| Err(Error::invalid_request("Email already registered in waitlist")));

        let (status, body) = call(
            app_state(command, MockWaitlistQuery::new()),
            join_request(json!({"username": "ada_l", "email": "ada@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already registered in waitlist");
    }

    #[actix_web::test]
    async fn join_rejects_malformed_json_with_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(
                    MockWaitlistCommand::new(),
                    MockWaitlistQuery::new(),
                )))
                .app_data(
                    web::JsonConfig::default()
                        .error_handler(crate::inbound::http::error::json_error_handler),
                )
                .service(web::scope("/api/waitlist").configure(configure)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/waitlist/join")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_envelope(res).await["success"], false);
    }

    #[actix_web::test]
    async fn entries_returns_empty_collection() {
        let mut query = MockWaitlistQuery::new();
        query.expect_entries().times(1).return_once(|| Ok(Vec::new()));

        let (status, body) = call(
            app_state(MockWaitlistCommand::new(), query),
            test::TestRequest::get().uri("/api/waitlist/entries"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Waitlist entries retrieved successfully");
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn entries_redacts_store_failures() {
        let mut query = MockWaitlistQuery::new();
        query
            .expect_entries()
            .return_once(|| Err(Error::internal("waitlist store query failed: timeout")));

        let (status, body) = call(
            app_state(MockWaitlistCommand::new(), query),
            test::TestRequest::get().uri("/api/waitlist/entries"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }
}
