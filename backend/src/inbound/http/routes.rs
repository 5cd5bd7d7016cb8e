//! Static route table for the `/api` surface.
//!
//! Each [`RouteGroup`] binds a path prefix to its handler registrations and
//! says whether the group sits behind [`BearerAuth`]. [`configure_api`] walks
//! the table once at startup.

use actix_web::middleware::Condition;
use actix_web::web;

use crate::inbound::http::{auth, social, users, waitlist};
use crate::middleware::BearerAuth;

/// Root prefix shared by every group.
pub const API_PREFIX: &str = "/api";

/// Authentication applied to a whole group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    Public,
    Bearer,
}

/// A path prefix and the handlers mounted under it.
#[derive(Clone, Copy)]
pub struct RouteGroup {
    pub prefix: &'static str,
    pub auth: AuthRequirement,
    pub configure: fn(&mut web::ServiceConfig),
}

impl RouteGroup {
    /// Full mount path, e.g. `/api/users`.
    pub fn path(&self) -> String {
        format!("{API_PREFIX}{}", self.prefix)
    }
}

/// Every group served under [`API_PREFIX`].
///
/// `/auth` stays public: its callback reads the bearer token itself because
/// the caller has no account row yet.
pub const ROUTE_GROUPS: &[RouteGroup] = &[
    RouteGroup {
        prefix: "/waitlist",
        auth: AuthRequirement::Public,
        configure: waitlist::configure,
    },
    RouteGroup {
        prefix: "/users",
        auth: AuthRequirement::Bearer,
        configure: users::configure,
    },
    RouteGroup {
        prefix: "/auth",
        auth: AuthRequirement::Public,
        configure: auth::configure,
    },
    RouteGroup {
        prefix: "/social",
        auth: AuthRequirement::Bearer,
        configure: social::configure,
    },
];

/// Register every entry of [`ROUTE_GROUPS`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use waitlist_backend::inbound::http::routes::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    for group in ROUTE_GROUPS {
        cfg.service(
            web::scope(&group.path())
                .wrap(Condition::new(
                    group.auth == AuthRequirement::Bearer,
                    BearerAuth,
                ))
                .configure(group.configure),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, read_envelope};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn prefixes_are_unique() {
        let prefixes: HashSet<_> = ROUTE_GROUPS.iter().map(|g| g.prefix).collect();
        assert_eq!(prefixes.len(), ROUTE_GROUPS.len());
    }

    #[rstest]
    #[case("/waitlist", AuthRequirement::Public)]
    #[case("/users", AuthRequirement::Bearer)]
    #[case("/auth", AuthRequirement::Public)]
    #[case("/social", AuthRequirement::Bearer)]
    fn groups_declare_expected_auth(#[case] prefix: &str, #[case] auth: AuthRequirement) {
        let group = ROUTE_GROUPS
            .iter()
            .find(|g| g.prefix == prefix)
            .expect("group registered");
        assert_eq!(group.auth, auth);
    }

    #[rstest]
    #[case::users(actix_test::TestRequest::get().uri("/api/users"))]
    #[case::me(actix_test::TestRequest::get().uri("/api/users/me"))]
    #[case::auth_url(actix_test::TestRequest::get().uri("/api/social/instagram/auth/url"))]
    #[case::callback(actix_test::TestRequest::get().uri("/api/social/instagram/auth/callback?code=x"))]
    #[case::channels(actix_test::TestRequest::get().uri("/api/social/channels"))]
    #[case::refresh(actix_test::TestRequest::post().uri(
        "/api/social/instagram/channels/0b6f1c8e-3f2a-4c55-9a3e-5c1f5e6d7a8b/refresh"
    ))]
    #[actix_web::test]
    async fn bearer_groups_reject_requests_without_header(#[case] req: actix_test::TestRequest) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .configure(configure_api),
        )
        .await;

        let res = actix_test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = read_envelope(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No authorization header");
    }

    #[actix_web::test]
    async fn fixture_identity_rejects_every_token() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .configure(configure_api),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/users/me")
            .insert_header((AUTHORIZATION, "Bearer anything"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_envelope(res).await["message"], "Invalid token");
    }

    #[actix_web::test]
    async fn public_groups_skip_bearer_check() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .configure(configure_api),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/waitlist/entries").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = read_envelope(res).await;
        assert_eq!(body["data"], serde_json::json!([]));
    }
}
