//! Shared fixtures for the HTTP integration suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::ServiceResponse;
use actix_web::web;
use async_trait::async_trait;

use campus_guide::domain::ports::{
    CompletionService, CompletionServiceError, FixedRandomSource, LocationRepository,
    LocationRepositoryError,
};
use campus_guide::domain::{AccountService, CampusGuideService, CampusSeed, College, Location};
use campus_guide::inbound::http::health::HealthState;
use campus_guide::inbound::http::state::HttpState;
use campus_guide::outbound::memory::InMemoryCredentialStore;
use campus_guide::outbound::password::Pbkdf2PasswordHasher;
use campus_guide::server::{AppDependencies, GuideAdapters, build_ports, seed_campus};

/// Completion double returning one scripted outcome and counting calls.
pub struct ScriptedCompletion {
    outcome: Result<String, CompletionServiceError>,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_owned()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(CompletionServiceError::transport("connection refused")),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// In-memory ports with the built-in campus already seeded.
pub async fn seeded_state(completion: Arc<dyn CompletionService>, pick: usize) -> HttpState {
    let ports = build_ports(
        None,
        GuideAdapters {
            completion,
            random: Arc::new(FixedRandomSource(pick)),
            hasher: Arc::new(Pbkdf2PasswordHasher::with_rounds(1)),
        },
    );
    seed_campus(ports.locations.as_ref())
        .await
        .expect("seeding in-memory store succeeds");
    ports.http
}

/// Location store whose every call fails with the same error.
pub struct BrokenLocations(pub LocationRepositoryError);

#[async_trait]
impl LocationRepository for BrokenLocations {
    async fn list_locations(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        Err(self.0.clone())
    }

    async fn get_college(&self) -> Result<Option<College>, LocationRepositoryError> {
        Err(self.0.clone())
    }

    async fn reseed(&self, _seed: &CampusSeed) -> Result<(), LocationRepositoryError> {
        Err(self.0.clone())
    }
}

/// Ports whose location store always fails with `failure`.
pub fn broken_store_state(failure: LocationRepositoryError) -> HttpState {
    let guide = CampusGuideService::new(
        Arc::new(BrokenLocations(failure)),
        ScriptedCompletion::failing(),
        Arc::new(FixedRandomSource(0)),
    );
    let accounts = AccountService::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(Pbkdf2PasswordHasher::with_rounds(1)),
    );
    HttpState::new(Arc::new(guide), Arc::new(accounts))
}

/// App dependencies with a throwaway session key and HTTP-friendly cookies.
pub fn dependencies(http_state: HttpState) -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(http_state),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
        session_ttl: Duration::from_secs(60 * 60),
        allowed_origins: vec!["http://localhost:5173".to_owned()],
    }
}

/// The session cookie set on `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
