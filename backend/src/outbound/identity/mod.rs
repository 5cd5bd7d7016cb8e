//! Identity-provider (GoTrue) outbound adapter.

mod http_provider;

pub use http_provider::GoTrueIdentityProvider;
