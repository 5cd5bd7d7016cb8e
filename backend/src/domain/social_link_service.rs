//! Instagram channel linking.
//!
//! Linking runs a fixed sequence of provider calls: code exchange, profile
//! lookup, long-lived token exchange, then a single channel insert. A failure
//! at any step aborts the flow without retrying or undoing earlier steps.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    ChannelLinkCommand, ChannelRepository, ChannelsQuery, SocialOAuthError, SocialOAuthProvider,
};
use crate::domain::{
    Account, ChannelTokenUpdate, ChannelView, Error, INSTAGRAM_SCOPES, NewChannel, Platform,
};

pub const MISSING_PARAMETERS_MESSAGE: &str = "Missing required parameters";
pub const CHANNEL_NOT_FOUND_MESSAGE: &str = "Channel not found";

fn map_provider_error(error: SocialOAuthError) -> Error {
    Error::internal(error.to_string())
}

/// Required scopes absent from `granted`, in canonical order.
pub fn missing_scopes(granted: &[String]) -> Vec<&'static str> {
    INSTAGRAM_SCOPES
        .into_iter()
        .filter(|scope| !granted.iter().any(|g| g.trim() == *scope))
        .collect()
}

#[derive(Clone)]
pub struct SocialLinkService<O: ?Sized, C: ?Sized> {
    provider: Arc<O>,
    channels: Arc<C>,
}

impl<O: ?Sized, C: ?Sized> SocialLinkService<O, C> {
    pub fn new(provider: Arc<O>, channels: Arc<C>) -> Self {
        Self { provider, channels }
    }
}

#[async_trait]
impl<O: ?Sized, C: ?Sized> ChannelLinkCommand for SocialLinkService<O, C>
where
    O: SocialOAuthProvider,
    C: ChannelRepository,
{
    async fn authorization_url(&self) -> Result<String, Error> {
        self.provider.authorization_url().map_err(map_provider_error)
    }

    async fn link(&self, account: &Account, code: &str) -> Result<ChannelView, Error> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::invalid_request(MISSING_PARAMETERS_MESSAGE)
                .with_field_error("code", "Authorization code is required"));
        }

        let short_lived = self
            .provider
            .exchange_code(code)
            .await
            .map_err(map_provider_error)?;
        let missing = missing_scopes(&short_lived.permissions);
        if !missing.is_empty() {
            let missing = missing.join(", ");
            warn!(account_id = %account.id, missing = %missing, "instagram grant is incomplete");
            return Err(Error::invalid_request(format!(
                "Missing required permissions: {missing}"
            )));
        }

        debug!(instagram_user_id = %short_lived.user_id, "fetching instagram profile");
        let profile = self
            .provider
            .fetch_profile(&short_lived.access_token)
            .await
            .map_err(map_provider_error)?;
        let long_lived = self
            .provider
            .long_lived_token(&short_lived.access_token)
            .await
            .map_err(map_provider_error)?;

        let channel = self
            .channels
            .create(&NewChannel {
                user_id: account.id,
                platform: Platform::Instagram,
                name: profile.username,
                profile_url: profile.profile_picture_url,
                connection_state: true,
                access_token: long_lived.access_token,
            })
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(account_id = %account.id, channel_id = %channel.id, "instagram account linked");
        Ok(channel.into())
    }

    async fn refresh(&self, account: &Account, channel_id: Uuid) -> Result<ChannelView, Error> {
        let channel = self
            .channels
            .find_by_id(channel_id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?
            .filter(|channel| channel.user_id == account.id && channel.platform == Platform::Instagram)
            .ok_or_else(|| Error::not_found(CHANNEL_NOT_FOUND_MESSAGE))?;
        let Some(current_token) = channel.access_token.as_deref() else {
            return Err(Error::internal(format!("channel {channel_id} has no access token")));
        };

        let refreshed = self
            .provider
            .refresh_long_lived_token(current_token)
            .await
            .map_err(map_provider_error)?;
        let profile = self
            .provider
            .fetch_profile(&refreshed.access_token)
            .await
            .map_err(map_provider_error)?;

        let updated = self
            .channels
            .update_token(
                channel_id,
                &ChannelTokenUpdate {
                    access_token: refreshed.access_token,
                    profile_url: profile.profile_picture_url.or(channel.profile_url),
                    connection_state: true,
                },
            )
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        info!(account_id = %account.id, channel_id = %channel_id, "instagram channel refreshed");
        Ok(updated.into())
    }
}

#[async_trait]
impl<O: ?Sized, C: ?Sized> ChannelsQuery for SocialLinkService<O, C>
where
    O: SocialOAuthProvider,
    C: ChannelRepository,
{
    async fn channels(&self, account: &Account) -> Result<Vec<ChannelView>, Error> {
        let channels = self
            .channels
            .list_for_account(account.id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(channels.into_iter().map(ChannelView::from).collect())
    }
}
