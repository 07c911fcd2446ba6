//! Port wiring for the HTTP state.
//!
//! A database pool selects the Diesel adapters; without one everything lives
//! in memory, which is how tests and quick local runs start.

use std::sync::Arc;

use crate::domain::ports::{
    CompletionService, CredentialStore, LocationRepository, PasswordHasher, RandomSource,
};
use crate::domain::{AccountService, CampusGuideService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryCredentialStore, InMemoryLocationStore};
use crate::outbound::persistence::{DbPool, DieselCredentialStore, DieselLocationRepository};

/// Capability adapters shared by both storage modes.
#[derive(Clone)]
pub struct GuideAdapters {
    pub completion: Arc<dyn CompletionService>,
    pub random: Arc<dyn RandomSource>,
    pub hasher: Arc<dyn PasswordHasher>,
}

/// HTTP state plus the location store handle needed for the boot reseed.
#[derive(Clone)]
pub struct AppPorts {
    pub http: HttpState,
    pub locations: Arc<dyn LocationRepository>,
}

fn assemble<L, C>(locations: Arc<L>, credentials: Arc<C>, adapters: GuideAdapters) -> AppPorts
where
    L: LocationRepository + 'static,
    C: CredentialStore + 'static,
{
    let GuideAdapters {
        completion,
        random,
        hasher,
    } = adapters;
    let guide = CampusGuideService::new(locations.clone(), completion, random);
    let accounts = AccountService::new(credentials, hasher);
    AppPorts {
        http: HttpState::new(Arc::new(guide), Arc::new(accounts)),
        locations,
    }
}

/// Build ports over PostgreSQL when `pool` is set, in-memory stores otherwise.
pub fn build_ports(pool: Option<&DbPool>, adapters: GuideAdapters) -> AppPorts {
    match pool {
        Some(pool) => assemble(
            Arc::new(DieselLocationRepository::new(pool.clone())),
            Arc::new(DieselCredentialStore::new(pool.clone())),
            adapters,
        ),
        None => assemble(
            Arc::new(InMemoryLocationStore::new()),
            Arc::new(InMemoryCredentialStore::new()),
            adapters,
        ),
    }
}
