//! Credential store held in memory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{Account, Email, UserId};

/// [`CredentialStore`] keyed by account id with an email index.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<UserId, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CredentialStoreError {
    CredentialStoreError::query("credential store lock poisoned")
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, account: &Account) -> Result<(), CredentialStoreError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.values().any(|existing| existing.email == account.email) {
            return Err(CredentialStoreError::duplicate(account.email.as_ref()));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts
            .values()
            .find(|account| &account.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, CredentialStoreError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.get(id).cloned())
    }
}
