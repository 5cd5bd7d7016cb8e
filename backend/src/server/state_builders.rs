//! Builders for outbound adapters and the HTTP state composed over them.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};
use zeroize::Zeroizing;

use waitlist_backend::domain::ports::{
    AccountRepository, ChannelRepository, FixtureAccountRepository, FixtureChannelRepository,
    FixtureIdentityProvider, FixtureProfileRepository, FixtureSocialOAuthProvider,
    FixtureWaitlistRepository, IdentityProvider, ProfileRepository, SocialOAuthProvider,
    WaitlistRepository,
};
use waitlist_backend::domain::{
    BearerAuthService, SignInService, SocialLinkService, UsersService, WaitlistService,
};
use waitlist_backend::inbound::http::state::HttpState;
use waitlist_backend::outbound::data_store::{
    PostgrestAccountRepository, PostgrestChannelRepository, PostgrestClient,
    PostgrestProfileRepository, PostgrestWaitlistRepository,
};
use waitlist_backend::outbound::identity::GoTrueIdentityProvider;
use waitlist_backend::outbound::instagram::{
    InstagramCredentials, InstagramEndpoints, InstagramHttpProvider,
};

use super::ServerConfig;

/// Driven-port implementations selected for this process.
struct Adapters {
    waitlist: Arc<dyn WaitlistRepository>,
    profiles: Arc<dyn ProfileRepository>,
    accounts: Arc<dyn AccountRepository>,
    channels: Arc<dyn ChannelRepository>,
    identity: Arc<dyn IdentityProvider>,
    social: Arc<dyn SocialOAuthProvider>,
}

fn client_error(what: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("failed to build {what} client: {error}"))
}

fn build_store_adapters(config: &ServerConfig) -> io::Result<Adapters> {
    let Some(store) = &config.data_store else {
        if !cfg!(debug_assertions) {
            return Err(io::Error::other(
                "WAITLIST_DATA_STORE_URL and WAITLIST_DATA_STORE_KEY are required",
            ));
        }
        warn!("data store not configured; using fixture adapters (dev only)");
        return Ok(Adapters {
            waitlist: Arc::new(FixtureWaitlistRepository),
            profiles: Arc::new(FixtureProfileRepository),
            accounts: Arc::new(FixtureAccountRepository),
            channels: Arc::new(FixtureChannelRepository),
            identity: Arc::new(FixtureIdentityProvider),
            social: Arc::new(FixtureSocialOAuthProvider),
        });
    };

    let client = Arc::new(
        PostgrestClient::new(&store.url, store.key.as_str(), config.http_timeout)
            .map_err(|e| client_error("data store", e))?,
    );
    let identity =
        GoTrueIdentityProvider::new(store.url.clone(), store.key.as_str(), config.http_timeout)
            .map_err(|e| client_error("identity provider", e))?;
    info!(url = %store.url, "using data store adapters");
    Ok(Adapters {
        waitlist: Arc::new(PostgrestWaitlistRepository::new(client.clone())),
        profiles: Arc::new(PostgrestProfileRepository::new(client.clone())),
        accounts: Arc::new(PostgrestAccountRepository::new(client.clone())),
        channels: Arc::new(PostgrestChannelRepository::new(client)),
        identity: Arc::new(identity),
        social: Arc::new(FixtureSocialOAuthProvider),
    })
}

fn build_social_provider(config: &ServerConfig) -> io::Result<Option<Arc<dyn SocialOAuthProvider>>> {
    let Some(instagram) = &config.instagram else {
        warn!("instagram app not configured; channel linking is disabled");
        return Ok(None);
    };
    let endpoints =
        InstagramEndpoints::production().map_err(|e| client_error("instagram", e))?;
    let provider = InstagramHttpProvider::new(
        InstagramCredentials {
            client_id: instagram.client_id.clone(),
            client_secret: Zeroizing::new(instagram.client_secret.clone()),
            redirect_uri: instagram.redirect_uri.clone(),
        },
        endpoints,
        config.http_timeout,
    )
    .map_err(|e| client_error("instagram", e))?;
    Ok(Some(Arc::new(provider)))
}

fn compose(adapters: Adapters, client_url: &str) -> HttpState {
    let waitlist = Arc::new(WaitlistService::new(adapters.waitlist));
    let sign_in = Arc::new(SignInService::new(
        adapters.identity.clone(),
        adapters.profiles.clone(),
        client_url,
    ));
    let social = Arc::new(SocialLinkService::new(
        adapters.social,
        adapters.channels.clone(),
    ));
    HttpState {
        waitlist: waitlist.clone(),
        waitlist_query: waitlist,
        users: Arc::new(UsersService::new(adapters.profiles, adapters.channels)),
        authenticator: Arc::new(BearerAuthService::new(
            adapters.identity,
            adapters.accounts,
            Arc::new(DefaultClock),
        )),
        sign_in: sign_in.clone(),
        profiles: sign_in,
        channel_links: social.clone(),
        channels: social,
    }
}

/// Build the HTTP state from configured collaborators.
///
/// # Errors
///
/// Fails when an outbound client cannot be built, or in release builds when
/// no data store is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let mut adapters = build_store_adapters(config)?;
    if let Some(social) = build_social_provider(config)? {
        adapters.social = social;
    }
    Ok(compose(adapters, &config.client_url))
}
