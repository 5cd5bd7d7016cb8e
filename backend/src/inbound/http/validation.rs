//! Shared validation helpers for inbound HTTP adapters.

use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Parse a path segment as a UUID, reporting the offending field.
pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        Error::invalid_request(format!("Invalid {field}"))
            .with_field_error(field, format!("{field} must be a valid UUID"))
    })
}

/// Parse a path segment as a [`UserId`].
pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    parse_uuid(value, "userId").map(UserId::from_uuid)
}
