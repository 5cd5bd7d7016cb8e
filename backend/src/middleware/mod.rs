//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route. [`Trace`] wraps
//! the whole app; [`BearerAuth`] wraps protected route groups.

pub mod auth;
pub mod trace;

pub use auth::BearerAuth;
pub use trace::Trace;
