//! Registration and sign-in over a [`CredentialStore`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};

use super::auth::Credentials;
use super::user::{Account, UserId};
use crate::domain::Error;
use crate::domain::ports::{
    AccountCommand, CredentialStore, CredentialStoreError, PasswordHasher, PasswordHasherError,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_store_error(error: CredentialStoreError) -> Error {
    match error {
        CredentialStoreError::Duplicate { .. } => Error::conflict("email is already registered"),
        other @ (CredentialStoreError::Connection { .. } | CredentialStoreError::Query { .. }) => {
            error!(error = %other, "credential store request failed");
            Error::storage(other.to_string())
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService<S> {
    store: Arc<S>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<S> AccountService<S> {
    pub fn new(store: Arc<S>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl<S> AccountCommand for AccountService<S>
where
    S: CredentialStore,
{
    async fn register(&self, credentials: &Credentials) -> Result<Account, Error> {
        let existing = self
            .store
            .find_by_email(credentials.email())
            .await
            .map_err(map_store_error)?;
        if existing.is_some() {
            return Err(Error::conflict("email is already registered"));
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .map_err(map_hasher_error)?;
        let account = Account {
            id: UserId::random(),
            email: credentials.email().clone(),
            password_hash,
            created_at: Utc::now(),
        };
        self.store.insert(&account).await.map_err(map_store_error)?;
        info!(user_id = %account.id, "account registered");
        Ok(account)
    }

    async fn verify(&self, credentials: &Credentials) -> Result<Account, Error> {
        let Some(account) = self
            .store
            .find_by_email(credentials.email())
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .map_err(map_hasher_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account)
    }

    async fn profile(&self, id: &UserId) -> Result<Account, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::unauthorized("session refers to an unknown account"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
