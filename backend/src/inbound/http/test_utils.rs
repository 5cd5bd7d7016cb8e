//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use mockable::DefaultClock;
use serde_json::Value;

use crate::domain::ports::{
    FixtureAccountRepository, FixtureChannelRepository, FixtureIdentityProvider,
    FixtureProfileRepository, FixtureSocialOAuthProvider, FixtureWaitlistRepository,
};
use crate::domain::{
    BearerAuthService, SignInService, SocialLinkService, UsersService, WaitlistService,
};
use crate::inbound::http::state::HttpState;

/// State wired to domain services over fixture adapters.
///
/// Every token is rejected and every store is empty.
pub fn fixture_state() -> HttpState {
    let waitlist = Arc::new(WaitlistService::new(Arc::new(FixtureWaitlistRepository)));
    let sign_in = Arc::new(SignInService::new(
        Arc::new(FixtureIdentityProvider),
        Arc::new(FixtureProfileRepository),
        "http://localhost:3000",
    ));
    let social = Arc::new(SocialLinkService::new(
        Arc::new(FixtureSocialOAuthProvider),
        Arc::new(FixtureChannelRepository),
    ));
    HttpState {
        waitlist: waitlist.clone(),
        waitlist_query: waitlist,
        users: Arc::new(UsersService::new(
            Arc::new(FixtureProfileRepository),
            Arc::new(FixtureChannelRepository),
        )),
        authenticator: Arc::new(BearerAuthService::new(
            Arc::new(FixtureIdentityProvider),
            Arc::new(FixtureAccountRepository),
            Arc::new(DefaultClock),
        )),
        sign_in: sign_in.clone(),
        profiles: sign_in,
        channel_links: social.clone(),
        channels: social,
    }
}

/// [`fixture_state`] with selected ports replaced.
pub fn state_with(configure: impl FnOnce(&mut HttpState)) -> HttpState {
    let mut state = fixture_state();
    configure(&mut state);
    state
}

/// Read a response body as JSON.
pub async fn read_envelope<B>(res: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    test::read_body_json(res).await
}
