//! PostgreSQL adapters built on Diesel, `diesel-async`, and a bb8 pool.
//!
//! Row structs and table definitions stay private to this module; the
//! repositories translate between them and domain types.

mod diesel_credential_store;
mod diesel_error_mapping;
mod diesel_location_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_credential_store::DieselCredentialStore;
pub use diesel_location_repository::DieselLocationRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
