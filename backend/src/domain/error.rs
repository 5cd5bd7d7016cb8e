//! Domain-level error type.
//!
//! Errors are transport agnostic: the HTTP adapter turns them into the
//! `{success, message, errors}` envelope and picks a status code from the
//! [`ErrorCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TraceId;

/// Failure category; adapters map it to a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed, fails validation or breaks a business rule.
    InvalidRequest,
    /// Authentication is missing or was rejected.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// A remote call or an invariant failed unexpectedly.
    InternalError,
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Request field the message refers to.
    #[schema(example = "username")]
    pub field: String,
    /// Human-readable explanation.
    #[schema(example = "Username must be at least 2 characters long")]
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain error payload.
///
/// Captures the ambient [`TraceId`] at construction time so adapters can
/// echo it back to clients.
///
/// # Examples
/// ```
/// use waitlist_backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("Validation failed")
///     .with_field_error("email", "Email is required");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.errors().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    errors: Vec<FieldError>,
    trace_id: Option<String>,
    exposed: bool,
}

impl Error {
    /// Create an error with the given category and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            errors: Vec::new(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            exposed: false,
        }
    }

    /// Category of the failure.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Field-level messages, empty unless validation failed.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Trace identifier captured when the error was built.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Whether an internal message may be shown to clients verbatim.
    pub fn is_exposed(&self) -> bool {
        self.exposed
    }

    /// Allow an internal message through response redaction.
    pub fn exposed(mut self) -> Self {
        self.exposed = true;
        self
    }

    /// Override the captured trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Append one field-level message.
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    /// Replace the field-level messages.
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::unauthorized("no token"), ErrorCode::Unauthorized)]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn shorthand_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
    }

    #[test]
    fn no_trace_id_outside_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[test]
    fn field_errors_accumulate_in_order() {
        let error = Error::invalid_request("Validation failed")
            .with_field_error("username", "Username is required")
            .with_field_error("email", "Email is required");
        let fields: Vec<_> = error.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["username", "email"]);
    }

    #[test]
    fn internal_errors_are_not_exposed_by_default() {
        assert!(!Error::internal("db down").is_exposed());
        assert!(Error::internal("Failed to process user data").exposed().is_exposed());
    }

    #[test]
    fn error_code_serialises_as_snake_case() {
        let json = serde_json::to_string(&ErrorCode::InvalidRequest).expect("serialise");
        assert_eq!(json, "\"invalid_request\"");
    }
}
