//! `channels` table adapter.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::client::{PostgrestClient, PostgrestError, eq};
use crate::domain::ports::{ChannelRepository, ChannelRepositoryError};
use crate::domain::{Channel, ChannelTokenUpdate, NewChannel};

const TABLE: &str = "channels";

fn map_error(error: PostgrestError) -> ChannelRepositoryError {
    if error.is_transport() {
        ChannelRepositoryError::connection(error.to_string())
    } else {
        ChannelRepositoryError::query(error.to_string())
    }
}

/// Channel repository over the data store's REST interface.
#[derive(Clone)]
pub struct PostgrestChannelRepository {
    client: Arc<PostgrestClient>,
}

impl PostgrestChannelRepository {
    pub fn new(client: Arc<PostgrestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChannelRepository for PostgrestChannelRepository {
    async fn create(&self, channel: &NewChannel) -> Result<Channel, ChannelRepositoryError> {
        self.client.insert(TABLE, channel).await.map_err(map_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, ChannelRepositoryError> {
        self.client
            .select_one(TABLE, &[eq("id", id)])
            .await
            .map_err(map_error)
    }

    async fn list_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<Channel>, ChannelRepositoryError> {
        self.client
            .select(TABLE, &[eq("user_id", account_id)])
            .await
            .map_err(map_error)
    }

    async fn update_token(
        &self,
        id: Uuid,
        update: &ChannelTokenUpdate,
    ) -> Result<Channel, ChannelRepositoryError> {
        self.client
            .update(TABLE, &[eq("id", id)], update)
            .await
            .map_err(map_error)
    }
}
