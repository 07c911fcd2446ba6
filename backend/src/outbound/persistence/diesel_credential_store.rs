//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{Account, Email, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Diesel implementation of [`CredentialStore`].
#[derive(Clone)]
pub struct DieselCredentialStore {
    pool: DbPool,
}

impl DieselCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CredentialStoreError {
    map_pool_error(error, CredentialStoreError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CredentialStoreError {
    map_diesel_error(
        error,
        CredentialStoreError::query,
        CredentialStoreError::connection,
    )
}

fn to_domain(row: Option<AccountRow>) -> Result<Option<Account>, CredentialStoreError> {
    row.map(|row| row.into_domain().map_err(CredentialStoreError::query))
        .transpose()
}

#[async_trait]
impl CredentialStore for DieselCredentialStore {
    async fn insert(&self, account: &Account) -> Result<(), CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                if is_unique_violation(&error) {
                    CredentialStoreError::duplicate(account.email.as_ref())
                } else {
                    diesel_error(error)
                }
            })
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        to_domain(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = accounts::table
            .find(*id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        to_domain(row)
    }
}
