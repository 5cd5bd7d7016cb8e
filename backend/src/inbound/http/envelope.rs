//! Response envelope shared by every `/api` endpoint.
//!
//! ```text
//! {"success": true, "message": "...", "data": {...}}
//! {"success": false, "message": "Validation failed", "errors": [{"field": "...", "message": "..."}]}
//! ```

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FieldError;

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiEnvelope<T> {
    /// Always `true` for this shape.
    pub success: bool,
    /// Human-readable outcome.
    #[schema(example = "Successfully joined waitlist")]
    pub message: String,
    /// Operation payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Wrap `data` in a successful envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Render with the given status.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always `false` for this shape.
    pub success: bool,
    #[schema(example = "Validation failed")]
    pub message: String,
    /// Field-level messages; omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors,
        }
    }
}
