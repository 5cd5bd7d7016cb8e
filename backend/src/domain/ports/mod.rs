//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, `*Provider`) are implemented by outbound
//! adapters; driving ports (`*Command`, `*Query`, `BearerAuthenticator`) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod bearer_authenticator;
mod channel_link_command;
mod channel_repository;
mod identity_provider;
mod profile_repository;
mod sign_in_command;
mod social_oauth_provider;
mod users_query;
mod waitlist_command;
mod waitlist_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountRepository, AccountRepositoryError, FixtureAccountRepository,
};
pub use bearer_authenticator::BearerAuthenticator;
#[cfg(test)]
pub use bearer_authenticator::MockBearerAuthenticator;
pub use channel_link_command::{ChannelLinkCommand, ChannelsQuery};
#[cfg(test)]
pub use channel_link_command::{MockChannelLinkCommand, MockChannelsQuery};
#[cfg(test)]
pub use channel_repository::MockChannelRepository;
pub use channel_repository::{
    ChannelRepository, ChannelRepositoryError, FixtureChannelRepository,
};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
pub use sign_in_command::{ProfileQuery, SignInCommand, SignInOutcome};
#[cfg(test)]
pub use sign_in_command::{MockProfileQuery, MockSignInCommand};
#[cfg(test)]
pub use social_oauth_provider::MockSocialOAuthProvider;
pub use social_oauth_provider::{
    FixtureSocialOAuthProvider, LongLivedToken, ShortLivedToken, SocialOAuthError,
    SocialOAuthProvider, SocialProfile,
};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{CurrentUser, UsersQuery};
pub use waitlist_command::{WaitlistCommand, WaitlistQuery};
#[cfg(test)]
pub use waitlist_command::{MockWaitlistCommand, MockWaitlistQuery};
#[cfg(test)]
pub use waitlist_repository::MockWaitlistRepository;
pub use waitlist_repository::{
    FixtureWaitlistRepository, WaitlistRepository, WaitlistRepositoryError,
};
