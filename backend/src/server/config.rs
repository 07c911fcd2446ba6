//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};

use crate::inbound::http::session_config::SessionSettings;

/// Everything `create_server` needs besides the ports.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) allowed_origins: Vec<String>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            allowed_origins: Vec::new(),
        }
    }

    /// Attach normalised CORS origins (see `inbound::http::cors::parse_origins`).
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
