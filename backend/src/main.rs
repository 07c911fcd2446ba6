//! Backend entry-point: loads settings, prepares storage, and serves HTTP.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use campus_guide::domain::ports::{CompletionService, DisabledCompletionService};
use campus_guide::inbound::http::cors::parse_origins;
use campus_guide::inbound::http::health::HealthState;
use campus_guide::inbound::http::session_config::{BuildMode, session_settings_from_env};
use campus_guide::outbound::gemini::{GeminiCompletionService, GeminiEndpoint};
use campus_guide::outbound::password::Pbkdf2PasswordHasher;
use campus_guide::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use campus_guide::outbound::random::SmallRngSource;
use campus_guide::server::{
    GuideAdapters, ServerConfig, build_ports, create_server, seed_campus,
};
use campus_guide::settings::GuideSettings;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let settings = GuideSettings::from_args(std::env::args_os())?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let origins = parse_origins(settings.allowed_origins())?;
    let bind_addr = settings.bind_addr()?;
    let pool = connect_database(&settings).await?;
    let ports = build_ports(
        pool.as_ref(),
        GuideAdapters {
            completion: completion_service(&settings)?,
            random: Arc::new(SmallRngSource::from_entropy()),
            hasher: Arc::new(Pbkdf2PasswordHasher::default()),
        },
    );
    seed_campus(ports.locations.as_ref())
        .await
        .wrap_err("failed to seed campus data")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, bind_addr).with_allowed_origins(origins);
    let server = create_server(health_state, ports.http, config)?;
    server.await?;
    Ok(())
}

async fn connect_database(settings: &GuideSettings) -> Result<Option<DbPool>> {
    let Some(url) = settings.database_url() else {
        warn!("CAMPUS_GUIDE_DATABASE_URL not set; using in-memory storage");
        return Ok(None);
    };
    let migration_url = url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database migrations complete");
    let pool = DbPool::new(PoolConfig::new(url))
        .await
        .map_err(|error| eyre!("failed to create database pool: {}", error.message()))?;
    Ok(Some(pool))
}

fn completion_service(settings: &GuideSettings) -> Result<Arc<dyn CompletionService>> {
    let Some(api_key) = settings.gemini_api_key() else {
        warn!("CAMPUS_GUIDE_GEMINI_API_KEY not set; replies use canned text only");
        return Ok(Arc::new(DisabledCompletionService));
    };
    let endpoint = GeminiEndpoint {
        base_url: Url::parse(settings.gemini_base_url())
            .wrap_err("CAMPUS_GUIDE_GEMINI_BASE_URL is not a valid URL")?,
        model: settings.gemini_model().to_owned(),
        api_key: api_key.to_owned(),
    };
    info!(model = %endpoint.model, "completion service enabled");
    let service = GeminiCompletionService::new(endpoint, settings.completion_timeout())?;
    Ok(Arc::new(service))
}
