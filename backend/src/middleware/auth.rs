//! Bearer-token authentication middleware.
//!
//! Wraps protected route groups. The `Authorization` header is parsed into a
//! [`BearerToken`], resolved through the [`BearerAuthenticator`] port held in
//! [`HttpState`], and the resulting [`AuthenticatedUser`] is stored in request
//! extensions for handlers to extract. Failures short-circuit with the error
//! envelope and never reach the wrapped service.
//!
//! [`BearerAuthenticator`]: crate::domain::ports::BearerAuthenticator

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::{AuthenticatedUser, BearerToken, Error};
use crate::inbound::http::state::HttpState;

/// Read the bearer token from a request's `Authorization` header.
pub fn bearer_token(req: &HttpRequest) -> Result<BearerToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());
    BearerToken::from_header(header).map_err(|err| {
        warn!(reason = %err, "bearer authentication failed");
        Error::unauthorized(err.to_string())
    })
}

/// Middleware factory requiring a verified bearer token.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use waitlist_backend::middleware::BearerAuth;
///
/// let scope = web::scope("/api/users").wrap(BearerAuth);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, Error> {
    let token = bearer_token(req.request())?;
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    debug!(token = %token.fingerprint(), "verifying bearer token");
    state.authenticator.authenticate(&token).await
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::unauthorized("No authorization header")),
        )
    }
}
