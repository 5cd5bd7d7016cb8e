//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and wrap results in the [`envelope::ApiEnvelope`]. Groups are mounted from
//! the table in [`routes`].

pub mod auth;
pub mod envelope;
pub mod error;
pub mod health;
pub mod routes;
pub mod social;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod waitlist;

pub use error::ApiResult;
