//! Waitlist, profile and social-linking backend.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] exposes them over HTTP; [`outbound`] talks to the
//! data store, the identity provider and Instagram.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
