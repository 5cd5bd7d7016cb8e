//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and data-store
//! adapters, and the services that implement the driving ports in
//! [`ports`]. Nothing here depends on Actix or `reqwest`.
//!
//! Public surface:
//! - Error / ErrorCode / FieldError: transport-agnostic failure payload.
//! - WaitlistSignup / WaitlistEntry: validated signup and stored row.
//! - VerifiedIdentity / Profile / Account: user views from each collaborator.
//! - Channel / ChannelView: linked social accounts with and without secrets.
//! - Services: waitlist, users, bearer auth, sign-in and social linking.

pub mod auth;
pub mod auth_service;
pub mod channel;
pub mod error;
pub mod ports;
pub mod social_link_service;
pub mod trace_id;
pub mod user;
pub mod users_service;
pub mod waitlist;
pub mod waitlist_service;

pub use self::auth::{AuthHeaderError, BearerToken, SignInProvider, SignInUrl};
pub use self::auth_service::{BearerAuthService, SignInService};
pub use self::channel::{
    Channel, ChannelTokenUpdate, ChannelView, INSTAGRAM_SCOPES, NewChannel, Platform,
};
pub use self::error::{Error, ErrorCode, FieldError};
pub use self::social_link_service::SocialLinkService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Account, AuthenticatedUser, Profile, UserId, UserValidationError, VerifiedIdentity,
};
pub use self::users_service::UsersService;
pub use self::waitlist::{
    EmailAddress, Username, WaitlistEntry, WaitlistSignup, WaitlistValidationError,
    validation_failed,
};
pub use self::waitlist_service::WaitlistService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use waitlist_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("No authorization header"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
