//! Port for reading and reseeding campus reference data.

use async_trait::async_trait;

use crate::domain::{CampusSeed, College, Location};

use super::define_port_error;

define_port_error! {
    /// Errors raised by location store implementations.
    pub enum LocationRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "location store connection failed: {message}",
        /// A statement failed or a row could not be converted.
        Query { message: String } => "location store query failed: {message}",
    }
}

/// Read side of the location store plus the boot-time reseed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Every location in insertion order.
    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError>;

    /// The college row, or `None` before the first seed.
    async fn get_college(&self) -> Result<Option<College>, LocationRepositoryError>;

    /// Replace every location with `seed.locations` and upsert the college.
    ///
    /// Implementations must apply the whole seed atomically.
    async fn reseed(&self, seed: &CampusSeed) -> Result<(), LocationRepositoryError>;
}
