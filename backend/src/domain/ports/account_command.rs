//! Driving port for account registration and sign-in.

use async_trait::async_trait;

use crate::domain::{Account, Credentials, Error, UserId};

/// Account operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Duplicate emails yield a `conflict` error.
    async fn register(&self, credentials: &Credentials) -> Result<Account, Error>;

    /// Check credentials. Any mismatch yields `unauthorized`.
    async fn verify(&self, credentials: &Credentials) -> Result<Account, Error>;

    /// Load the account behind a session.
    async fn profile(&self, id: &UserId) -> Result<Account, Error>;
}
