//! Auth API handlers.
//!
//! ```text
//! POST /api/auth/google
//! POST /api/auth/callback      (Authorization: Bearer <token>)
//! GET  /api/auth/profile/{userId}
//! ```
//!
//! The group is public; `/callback` reads its bearer token itself so the
//! caller's profile can be created before any account exists.

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SignInOutcome;
use crate::domain::{AuthHeaderError, BearerToken, Error, Profile, SignInUrl};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiEnvelope, ErrorEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

pub const MISSING_TOKEN_MESSAGE: &str = "No authorization token provided";

/// `data` of a profile lookup.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileData {
    pub profile: Profile,
}

fn callback_token(req: &HttpRequest) -> Result<BearerToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());
    BearerToken::from_header(header).map_err(|err| match err {
        AuthHeaderError::Missing | AuthHeaderError::EmptyToken => {
            Error::unauthorized(MISSING_TOKEN_MESSAGE)
        }
        AuthHeaderError::UnsupportedScheme => Error::unauthorized(err.to_string()),
    })
}

/// Start a Google sign-in through the identity provider.
#[utoipa::path(
    post,
    path = "/api/auth/google",
    responses(
        (status = 200, description = "Sign-in URL", body = ApiEnvelope<SignInUrl>),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "googleSignIn",
    security([])
)]
#[post("/google")]
pub async fn google_sign_in(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let url = state.sign_in.google_sign_in_url().await?;
    Ok(ApiEnvelope::ok("Google sign-in URL generated successfully", url).respond(StatusCode::OK))
}

/// Finish sign-in: verify the issued token and refresh the caller's profile.
#[utoipa::path(
    post,
    path = "/api/auth/callback",
    responses(
        (status = 200, description = "Authenticated", body = ApiEnvelope<SignInOutcome>),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "authCallback",
    security(("bearer" = []))
)]
#[post("/callback")]
pub async fn auth_callback(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let token = callback_token(&req)?;
    let outcome = state.sign_in.complete_sign_in(&token).await?;
    Ok(ApiEnvelope::ok("Authentication successful", outcome).respond(StatusCode::OK))
}

/// Fetch a profile by user id.
#[utoipa::path(
    get,
    path = "/api/auth/profile/{userId}",
    params(("userId" = String, Path, description = "Identity-provider user id (UUID)")),
    responses(
        (status = 200, description = "Profile", body = ApiEnvelope<ProfileData>),
        (status = 400, description = "Invalid user id", body = ErrorEnvelope),
        (status = 404, description = "Profile not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "getProfile",
    security([])
)]
#[get("/profile/{user_id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path.into_inner())?;
    let profile = state.profiles.profile(&user_id).await?;
    Ok(ApiEnvelope::ok("Profile retrieved successfully", ProfileData { profile })
        .respond(StatusCode::OK))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(google_sign_in)
        .service(auth_callback)
        .service(get_profile);
}
