//! Port for persisting account credentials.

use async_trait::async_trait;

use crate::domain::{Account, Email, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store implementations.
    pub enum CredentialStoreError {
        /// An account with the same email already exists.
        Duplicate { email: String } => "an account for {email} already exists",
        /// The store could not be reached.
        Connection { message: String } => "credential store connection failed: {message}",
        /// A statement failed or a row could not be converted.
        Query { message: String } => "credential store query failed: {message}",
    }
}

/// Storage for registered accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new account. Fails with `Duplicate` when the email is taken.
    async fn insert(&self, account: &Account) -> Result<(), CredentialStoreError>;

    /// Look an account up by its normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, CredentialStoreError>;

    /// Look an account up by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, CredentialStoreError>;
}
