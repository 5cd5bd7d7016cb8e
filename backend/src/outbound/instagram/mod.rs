//! Instagram business-login outbound adapter.
//!
//! Implements the `SocialOAuthProvider` port over reqwest. Endpoint hosts are
//! configurable so tests can point them at a local fake.

mod dto;
mod http_provider;

pub use http_provider::{InstagramCredentials, InstagramEndpoints, InstagramHttpProvider};
