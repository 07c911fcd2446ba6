//! Schema migrations compiled into the binary.
//!
//! Diesel's migration harness is synchronous, so callers on the async runtime
//! should run [`run_pending_migrations`] inside `spawn_blocking`.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
}

/// Apply every migration not yet recorded in the database.
///
/// Returns the number of migrations applied.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply(error.to_string()))?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}
