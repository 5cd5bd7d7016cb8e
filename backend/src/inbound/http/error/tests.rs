//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

async fn body_of(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("waitlist store connection failed: refused").with_trace_id(TRACE_ID);
    let response = error.error_response();

    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some(TRACE_ID)
    );
    assert_eq!(
        body_of(response).await,
        json!({"success": false, "message": "Internal server error"})
    );
}

#[actix_web::test]
async fn exposed_internal_errors_keep_their_message() {
    let response = Error::internal("Failed to process user data")
        .exposed()
        .error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(response).await["message"], "Failed to process user data");
}

#[actix_web::test]
async fn validation_errors_list_fields() {
    let response = Error::invalid_request("Validation failed")
        .with_field_error("username", "Username is required")
        .error_response();
    assert_eq!(
        body_of(response).await,
        json!({
            "success": false,
            "message": "Validation failed",
            "errors": [{"field": "username", "message": "Username is required"}]
        })
    );
}

#[actix_web::test]
async fn errors_without_trace_id_omit_header() {
    let response = Error::not_found("Profile not found").error_response();
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}
