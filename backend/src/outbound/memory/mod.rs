//! In-process adapters used when no database is configured and in tests.
//!
//! State lives behind `std::sync::RwLock`; locks are never held across an
//! await point.

mod credential_store;
mod location_store;

pub use credential_store::InMemoryCredentialStore;
pub use location_store::InMemoryLocationStore;
