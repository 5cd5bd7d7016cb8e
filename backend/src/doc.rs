//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api` plus the health probe,
//! the envelope and entity schemas, and the bearer security scheme used by
//! protected groups. The document backs Swagger UI (debug builds) and the
//! `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{CurrentUser, SignInOutcome};
use crate::domain::{
    ChannelView, ErrorCode, FieldError, Platform, Profile, SignInProvider, SignInUrl,
    WaitlistEntry,
};
use crate::inbound::http::auth::ProfileData;
use crate::inbound::http::envelope::ErrorEnvelope;
use crate::inbound::http::health::HealthStatus;
use crate::inbound::http::social::AuthUrlData;
use crate::inbound::http::waitlist::JoinWaitlistRequest;

/// Adds the `bearer` scheme referenced by protected operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .description(Some("Access token issued by the identity provider."))
            .build();
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Waitlist backend API",
        description = "Waitlist signup, profiles and Instagram channel linking."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::waitlist::join_waitlist,
        crate::inbound::http::waitlist::list_entries,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::auth::google_sign_in,
        crate::inbound::http::auth::auth_callback,
        crate::inbound::http::auth::get_profile,
        crate::inbound::http::social::instagram_auth_url,
        crate::inbound::http::social::instagram_auth_callback,
        crate::inbound::http::social::list_channels,
        crate::inbound::http::social::refresh_channel,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCode,
        FieldError,
        HealthStatus,
        JoinWaitlistRequest,
        WaitlistEntry,
        Profile,
        CurrentUser,
        SignInProvider,
        SignInUrl,
        SignInOutcome,
        ProfileData,
        Platform,
        ChannelView,
        AuthUrlData,
    )),
    tags(
        (name = "health", description = "Readiness probe"),
        (name = "waitlist", description = "Public waitlist signup"),
        (name = "users", description = "Profiles and the current caller"),
        (name = "auth", description = "Identity-provider sign-in"),
        (name = "social", description = "Linked Instagram channels")
    )
)]
pub struct ApiDoc;
