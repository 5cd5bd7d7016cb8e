//! Health probe used by orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared readiness flag, flipped once the listener is bound.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a state that reports `starting` until [`Self::mark_ready`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Probe body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: &'static str,
}

impl HealthStatus {
    /// Status code and body for a single readiness observation.
    fn observe(ready: bool) -> (StatusCode, Self) {
        if ready {
            (StatusCode::OK, Self { status: "healthy" })
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Self { status: "starting" })
        }
    }
}

/// Report whether the server can take traffic.
#[utoipa::path(
    get,
    path = "/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready", body = HealthStatus),
        (status = 503, description = "Server is still starting", body = HealthStatus)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    let (code, body) = HealthStatus::observe(state.is_ready());
    HttpResponse::build(code)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(body)
}
