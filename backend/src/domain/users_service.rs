//! Users domain service: profile listing and the caller's own details.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ChannelRepository, CurrentUser, ProfileRepository, UsersQuery,
};
use crate::domain::{AuthenticatedUser, ChannelView, Error, Profile};

#[derive(Clone)]
pub struct UsersService<P: ?Sized, C: ?Sized> {
    profiles: Arc<P>,
    channels: Arc<C>,
}

impl<P: ?Sized, C: ?Sized> UsersService<P, C> {
    pub fn new(profiles: Arc<P>, channels: Arc<C>) -> Self {
        Self { profiles, channels }
    }
}

#[async_trait]
impl<P: ?Sized, C: ?Sized> UsersQuery for UsersService<P, C>
where
    P: ProfileRepository,
    C: ChannelRepository,
{
    async fn list_users(&self) -> Result<Vec<Profile>, Error> {
        self.profiles
            .list_recently_updated()
            .await
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn current_user(&self, user: &AuthenticatedUser) -> Result<CurrentUser, Error> {
        let channels = self
            .channels
            .list_for_account(user.account().id)
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(CurrentUser {
            metadata: user.identity().user_metadata.clone(),
            channels: channels.into_iter().map(ChannelView::from).collect(),
        })
    }
}
