//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, CampusGuideQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub guide: Arc<dyn CampusGuideQuery>,
    pub accounts: Arc<dyn AccountCommand>,
}

impl HttpState {
    pub fn new(guide: Arc<dyn CampusGuideQuery>, accounts: Arc<dyn AccountCommand>) -> Self {
        Self { guide, accounts }
    }
}
