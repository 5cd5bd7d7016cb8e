//! Driven port for the `channels` table.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Channel, ChannelTokenUpdate, NewChannel};

use super::define_port_error;

define_port_error! {
    /// Errors raised by channel repository adapters.
    pub enum ChannelRepositoryError {
        /// The data store could not be reached.
        Connection { message: String } => "channel store connection failed: {message}",
        /// The data store rejected or failed the query.
        Query { message: String } => "channel store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Store a newly linked channel.
    async fn create(&self, channel: &NewChannel) -> Result<Channel, ChannelRepositoryError>;

    /// Channel with the given id, if any.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, ChannelRepositoryError>;

    /// Channels owned by an account.
    async fn list_for_account(&self, account_id: Uuid)
    -> Result<Vec<Channel>, ChannelRepositoryError>;

    /// Replace the token and profile picture of a channel.
    async fn update_token(
        &self,
        id: Uuid,
        update: &ChannelTokenUpdate,
    ) -> Result<Channel, ChannelRepositoryError>;
}

/// Stateless stand-in used when no data store is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureChannelRepository;

#[async_trait]
impl ChannelRepository for FixtureChannelRepository {
    async fn create(&self, channel: &NewChannel) -> Result<Channel, ChannelRepositoryError> {
        Ok(Channel {
            id: Uuid::new_v4(),
            user_id: channel.user_id,
            platform: channel.platform,
            name: Some(channel.name.clone()),
            profile_url: channel.profile_url.clone(),
            access_token: Some(channel.access_token.as_str().to_owned()),
            connection_state: channel.connection_state,
            created_at: Some(Utc::now()),
        })
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Channel>, ChannelRepositoryError> {
        Ok(None)
    }

    async fn list_for_account(
        &self,
        _account_id: Uuid,
    ) -> Result<Vec<Channel>, ChannelRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_token(
        &self,
        id: Uuid,
        _update: &ChannelTokenUpdate,
    ) -> Result<Channel, ChannelRepositoryError> {
        Err(ChannelRepositoryError::query(format!("channel {id} does not exist")))
    }
}
