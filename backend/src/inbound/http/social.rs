//! Social channel handlers. The whole group sits behind the bearer
//! middleware.
//!
//! ```text
//! GET  /api/social/instagram/auth/url
//! GET  /api/social/instagram/auth/callback?code=...
//! GET  /api/social/channels
//! POST /api/social/instagram/channels/{channelId}/refresh
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AuthenticatedUser, ChannelView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiEnvelope, ErrorEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_uuid;

/// `data` of the authorization URL response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlData {
    #[schema(example = "https://www.instagram.com/oauth/authorize?client_id=...")]
    pub auth_url: String,
}

/// Query string Instagram appends to the redirect.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by Instagram.
    pub code: Option<String>,
}

/// URL that starts the Instagram business login.
#[utoipa::path(
    get,
    path = "/api/social/instagram/auth/url",
    responses(
        (status = 200, description = "Authorization URL", body = ApiEnvelope<AuthUrlData>),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["social"],
    operation_id = "instagramAuthUrl",
    security(("bearer" = []))
)]
#[get("/instagram/auth/url")]
pub async fn instagram_auth_url(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let auth_url = state.channel_links.authorization_url().await?;
    Ok(
        ApiEnvelope::ok("Instagram auth URL generated successfully", AuthUrlData { auth_url })
            .respond(StatusCode::OK),
    )
}

/// Link the Instagram account that granted `code` to the caller.
#[utoipa::path(
    get,
    path = "/api/social/instagram/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 200, description = "Channel linked", body = ApiEnvelope<ChannelView>),
        (status = 400, description = "Missing code or permissions", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["social"],
    operation_id = "instagramAuthCallback",
    security(("bearer" = []))
)]
#[get("/instagram/auth/callback")]
pub async fn instagram_auth_callback(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    query: web::Query<CallbackQuery>,
) -> ApiResult<HttpResponse> {
    let code = query.into_inner().code.unwrap_or_default();
    let channel = state.channel_links.link(user.account(), &code).await?;
    Ok(ApiEnvelope::ok("Instagram account linked successfully", channel).respond(StatusCode::OK))
}

/// Channels linked by the caller.
#[utoipa::path(
    get,
    path = "/api/social/channels",
    responses(
        (status = 200, description = "Channels", body = ApiEnvelope<Vec<ChannelView>>),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["social"],
    operation_id = "listChannels",
    security(("bearer" = []))
)]
#[get("/channels")]
pub async fn list_channels(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let channels = state.channels.channels(user.account()).await?;
    Ok(ApiEnvelope::ok("Channels retrieved successfully", channels).respond(StatusCode::OK))
}

/// Extend the long-lived token of one of the caller's channels.
#[utoipa::path(
    post,
    path = "/api/social/instagram/channels/{channelId}/refresh",
    params(("channelId" = String, Path, description = "Channel id (UUID)")),
    responses(
        (status = 200, description = "Channel refreshed", body = ApiEnvelope<ChannelView>),
        (status = 400, description = "Invalid channel id", body = ErrorEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 404, description = "Channel not found", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["social"],
    operation_id = "refreshInstagramChannel",
    security(("bearer" = []))
)]
#[post("/instagram/channels/{channel_id}/refresh")]
pub async fn refresh_channel(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let channel_id = parse_uuid(&path.into_inner(), "channelId")?;
    let channel = state
        .channel_links
        .refresh(user.account(), channel_id)
        .await?;
    Ok(ApiEnvelope::ok("Instagram channel refreshed", channel).respond(StatusCode::OK))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(instagram_auth_url)
        .service(instagram_auth_callback)
        .service(list_channels)
        .service(refresh_channel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockBearerAuthenticator, MockChannelLinkCommand, MockChannelsQuery,
    };
    use crate::domain::{Account, Error, Platform, VerifiedIdentity};
    use crate::inbound::http::test_utils::{read_envelope, state_with};
    use crate::middleware::BearerAuth;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use uuid::Uuid;

    fn account_id() -> Uuid {
        Uuid::from_u128(0x11)
    }

    fn caller() -> AuthenticatedUser {
        let identity: VerifiedIdentity = serde_json::from_value(json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "email": "ada@example.com"
        }))
        .expect("identity json");
        AuthenticatedUser::new(
            identity,
            Account {
                id: account_id(),
                email: "ada@example.com".into(),
                full_name: None,
                updated_at: None,
            },
        )
    }

    fn view(id: Uuid) -> ChannelView {
        ChannelView {
            id,
            user_id: account_id(),
            platform: Platform::Instagram,
            name: Some("ada.codes".into()),
            profile_url: None,
            connection_state: true,
            created_at: None,
        }
    }

    fn signed_in() -> MockBearerAuthenticator {
        let mut authenticator = MockBearerAuthenticator::new();
        authenticator
            .expect_authenticate()
            .returning(|_| Ok(caller()));
        authenticator
    }

    async fn call(
        links: MockChannelLinkCommand,
        channels: MockChannelsQuery,
        req: test::TestRequest,
    ) -> (StatusCode, Value) {
        let state = state_with(|state| {
            state.authenticator = Arc::new(signed_in());
            state.channel_links = Arc::new(links);
            state.channels = Arc::new(channels);
        });
        let app = test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/social")
                    .wrap(BearerAuth)
                    .configure(configure),
            ),
        )
        .await;
        let res = test::call_service(
            &app,
            req.insert_header((AUTHORIZATION, "Bearer good"))
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, read_envelope(res).await)
    }

    #[actix_web::test]
    async fn auth_url_is_wrapped_as_auth_url() {
        let mut links = MockChannelLinkCommand::new();
        links
            .expect_authorization_url()
            .return_once(|| Ok("https://www.instagram.com/oauth/authorize?x=1".into()));

        let (status, body) = call(
            links,
            MockChannelsQuery::new(),
            test::TestRequest::get().uri("/api/social/instagram/auth/url"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["authUrl"],
            "https://www.instagram.com/oauth/authorize?x=1"
        );
    }

    #[rstest]
    #[case("/api/social/instagram/auth/callback?code=abc", "abc")]
    #[case("/api/social/instagram/auth/callback", "")]
    #[actix_web::test]
    async fn callback_passes_code_and_caller_account(#[case] uri: &str, #[case] code: &str) {
        let expected = code.to_owned();
        let mut links = MockChannelLinkCommand::new();
        links
            .expect_link()
            .withf(move |account, code| account.id == account_id() && code == expected)
            .times(1)
            .return_once(|_, _| Ok(view(Uuid::from_u128(7))));

        let (status, body) = call(
            links,
            MockChannelsQuery::new(),
            test::TestRequest::get().uri(uri),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Instagram account linked successfully");
        assert_eq!(body["data"]["platform"], "instagram");
        assert!(body["data"].get("access_token").is_none());
    }

    #[actix_web::test]
    async fn callback_surfaces_missing_parameters() {
        let mut links = MockChannelLinkCommand::new();
        links
            .expect_link()
            .return_once(|_, _| Err(Error::invalid_request("Missing required parameters")));

        let (status, body) = call(
            links,
            MockChannelsQuery::new(),
            test::TestRequest::get().uri("/api/social/instagram/auth/callback"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required parameters");
    }

    #[actix_web::test]
    async fn channels_lists_caller_channels() {
        let mut channels = MockChannelsQuery::new();
        channels
            .expect_channels()
            .withf(|account| account.id == account_id())
            .return_once(|_| Ok(vec![view(Uuid::from_u128(1)), view(Uuid::from_u128(2))]));

        let (status, body) = call(
            MockChannelLinkCommand::new(),
            channels,
            test::TestRequest::get().uri("/api/social/channels"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn refresh_parses_channel_id() {
        let channel_id = Uuid::from_u128(9);
        let mut links = MockChannelLinkCommand::new();
        links
            .expect_refresh()
            .withf(move |_, id| *id == channel_id)
            .return_once(move |_, id| Ok(view(id)));

        let (status, body) = call(
            links,
            MockChannelsQuery::new(),
            test::TestRequest::post()
                .uri(&format!("/api/social/instagram/channels/{channel_id}/refresh")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Instagram channel refreshed");
        assert_eq!(body["data"]["id"], channel_id.to_string());
    }

    #[actix_web::test]
    async fn refresh_rejects_malformed_channel_id() {
        let mut links = MockChannelLinkCommand::new();
        links.expect_refresh().never();

        let (status, body) = call(
            links,
            MockChannelsQuery::new(),
            test::TestRequest::post().uri("/api/social/instagram/channels/nope/refresh"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "channelId");
    }
}
