//! Outbound adapters implementing domain driven ports.
//!
//! - [`data_store`]: PostgREST repositories for waitlist, profiles, accounts
//!   and channels.
//! - [`identity`]: bearer-token verification and sign-in URLs.
//! - [`instagram`]: the Instagram business login flow.

pub mod data_store;
pub mod identity;
pub mod instagram;
