//! Shared HTTP adapter state.
//!
//! Handlers and the bearer middleware accept this state via
//! `actix_web::web::Data` so they only depend on driving ports and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BearerAuthenticator, ChannelLinkCommand, ChannelsQuery, ProfileQuery, SignInCommand,
    UsersQuery, WaitlistCommand, WaitlistQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub waitlist: Arc<dyn WaitlistCommand>,
    pub waitlist_query: Arc<dyn WaitlistQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub authenticator: Arc<dyn BearerAuthenticator>,
    pub sign_in: Arc<dyn SignInCommand>,
    pub profiles: Arc<dyn ProfileQuery>,
    pub channel_links: Arc<dyn ChannelLinkCommand>,
    pub channels: Arc<dyn ChannelsQuery>,
}
