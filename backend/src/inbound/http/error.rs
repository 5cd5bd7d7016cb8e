//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while turning failures into the
//! `{success: false, message, errors}` envelope. Internal failures are logged
//! in full and reach clients as `Internal server error` unless the domain
//! marked the message as exposed.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::envelope::ErrorEnvelope;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn envelope_for(error: &Error) -> ErrorEnvelope {
    if matches!(error.code(), ErrorCode::InternalError) && !error.is_exposed() {
        ErrorEnvelope::new(INTERNAL_SERVER_ERROR_MESSAGE, Vec::new())
    } else {
        ErrorEnvelope::new(error.message(), error.errors().to_vec())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(message = %self.message(), trace_id = ?self.trace_id(), "request failed");
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_SERVER_ERROR_MESSAGE)
    }
}

fn bad_request(detail: impl std::fmt::Display, message: &str) -> actix_web::Error {
    warn!(%detail, "malformed request rejected");
    Error::invalid_request(message).into()
}

/// `JsonConfig` error handler producing a 400 envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "Invalid JSON body")
}

/// `QueryConfig` error handler producing a 400 envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "Invalid query string")
}

/// `PathConfig` error handler producing a 400 envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err, "Invalid path parameter")
}

#[cfg(test)]
mod tests;
