//! Users API handlers. Both routes sit behind the bearer middleware.
//!
//! ```text
//! GET /api/users
//! GET /api/users/me
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};

use crate::domain::ports::CurrentUser;
use crate::domain::{AuthenticatedUser, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiEnvelope, ErrorEnvelope};
use crate::inbound::http::state::HttpState;

/// List profiles, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = ApiEnvelope<Vec<Profile>>),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("bearer" = []))
)]
#[get("")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(ApiEnvelope::ok("Users retrieved successfully", users).respond(StatusCode::OK))
}

/// The caller's identity metadata and linked channels.
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = ApiEnvelope<CurrentUser>),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("bearer" = []))
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let current = state.users.current_user(&user).await?;
    Ok(ApiEnvelope::ok("Current user retrieved successfully", current).respond(StatusCode::OK))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users).service(current_user);
}
