//! Driving port for the campus-guide endpoints.

use async_trait::async_trait;

use crate::domain::{College, Error, GuideQuery, GuideReply, Location};

/// Read operations and the conversational reply exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CampusGuideQuery: Send + Sync {
    /// Every known location in store order.
    async fn locations(&self) -> Result<Vec<Location>, Error>;

    /// The college record, if seeded.
    async fn college(&self) -> Result<Option<College>, Error>;

    /// Answer a free-text question. Completion failures never surface here.
    async fn answer(&self, query: &GuideQuery) -> Result<GuideReply, Error>;
}
