//! Location store held in memory.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{CampusSeed, College, Location};

#[derive(Debug, Default)]
struct Snapshot {
    locations: Vec<Location>,
    college: Option<College>,
}

/// [`LocationRepository`] backed by a `Vec` that keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    state: RwLock<Snapshot>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> LocationRepositoryError {
    LocationRepositoryError::query("location store lock poisoned")
}

#[async_trait]
impl LocationRepository for InMemoryLocationStore {
    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.locations.clone())
    }

    async fn get_college(&self) -> Result<Option<College>, LocationRepositoryError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.college.clone())
    }

    async fn reseed(&self, seed: &CampusSeed) -> Result<(), LocationRepositoryError> {
        let mut state = self.state.write().map_err(poisoned)?;
        *state = Snapshot {
            locations: seed.locations.clone(),
            college: Some(seed.college.clone()),
        };
        info!(locations = state.locations.len(), "location store reseeded");
        Ok(())
    }
}
