//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, HttpServer, web};
use tracing::info;

use waitlist_backend::Trace;
use waitlist_backend::domain::TRACE_ID_HEADER;
#[cfg(debug_assertions)]
use waitlist_backend::doc::ApiDoc;
use waitlist_backend::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler,
};
use waitlist_backend::inbound::http::health::{HealthState, health};
use waitlist_backend::inbound::http::routes::configure_api;
use waitlist_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// CORS policy admitting the configured front-end origin.
fn cors(client_url: &str) -> Cors {
    Cors::default()
        .allowed_origin(client_url.trim_end_matches('/'))
        .allowed_methods(["GET", "POST"])
        .allowed_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .expose_headers([TRACE_ID_HEADER])
        .max_age(3600)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    client_url: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(cors(client_url))
        .wrap(Trace)
        .service(health)
        .configure(configure_api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
///
/// Propagates adapter construction failures and socket bind errors.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let server_health_state = health_state.clone();
    let client_url = config.client_url.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), &client_url)
    })
    .bind(config.bind_addr())?
    .run();

    let (host, port) = config.bind_addr();
    info!(host, port, "server listening");
    health_state.mark_ready();
    Ok(server)
}
