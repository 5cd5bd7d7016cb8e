//! Driving ports for linking and reading social channels.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Account, ChannelView, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelLinkCommand: Send + Sync {
    /// URL that starts the Instagram authorization flow.
    async fn authorization_url(&self) -> Result<String, Error>;

    /// Complete the flow for `account` with the code Instagram returned.
    async fn link(&self, account: &Account, code: &str) -> Result<ChannelView, Error>;

    /// Extend the token of a channel owned by `account`.
    async fn refresh(&self, account: &Account, channel_id: Uuid) -> Result<ChannelView, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelsQuery: Send + Sync {
    /// Channels linked by `account`.
    async fn channels(&self, account: &Account) -> Result<Vec<ChannelView>, Error>;
}
