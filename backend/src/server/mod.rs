//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{AppPorts, GuideAdapters, build_ports};

use std::time::Duration;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, body::MessageBody, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{CampusSeed, LocationValidationError};
use crate::inbound::http::auth::{login, logout, register};
use crate::inbound::http::cors::cors_middleware;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::guide::ask;
use crate::inbound::http::health::{HealthState, api_health, banner, live, ready};
use crate::inbound::http::locations::{get_college, list_locations};
use crate::inbound::http::session::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::current_user;

const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Per-worker inputs for [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub session_ttl: Duration,
    pub allowed_origins: Vec<String>,
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    ttl: Duration,
) -> SessionMiddleware<CookieSessionStore> {
    let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(actix_web::cookie::time::Duration::seconds(ttl_secs)),
        )
        .build()
}

/// Assemble the application: routes, session cookies, CORS, and tracing.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        session_ttl,
        allowed_origins,
    } = deps;

    let api = web::scope("/api")
        .wrap(session_middleware(key, cookie_secure, same_site, session_ttl))
        .service(api_health)
        .service(list_locations)
        .service(get_college)
        .service(ask)
        .service(current_user)
        .service(
            web::scope("/auth")
                .service(register)
                .service(login)
                .service(logout),
        );

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT_BYTES)
                .error_handler(json_error_handler),
        )
        .wrap(cors_middleware(&allowed_origins))
        .wrap(Trace)
        .service(banner)
        .service(ready)
        .service(live)
        .service(api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Failures while writing the built-in campus data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("built-in campus data is invalid: {0}")]
    Invalid(#[from] LocationValidationError),
    #[error(transparent)]
    Store(#[from] LocationRepositoryError),
}

/// Replace stored campus data with the built-in seed.
///
/// Returns the number of locations written.
pub async fn seed_campus(locations: &dyn LocationRepository) -> Result<usize, SeedError> {
    let seed = CampusSeed::builtin()?;
    locations.reseed(&seed).await?;
    let count = seed.locations.len();
    info!(count, college = seed.college.name(), "campus data reseeded");
    Ok(count)
}

/// Bind and start the HTTP server.
///
/// Readiness flips once the listener is bound; callers reseed before this.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        session_ttl,
        bind_addr,
        allowed_origins,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            session_ttl,
            allowed_origins: allowed_origins.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
