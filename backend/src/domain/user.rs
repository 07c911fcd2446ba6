//! Account identity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for account identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain a single @ with text on both sides")]
    MalformedEmail,
}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a canonical UUID string.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(AccountValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| AccountValidationError::InvalidId)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised email address: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use campus_guide::domain::Email;
    ///
    /// let email = Email::new("  Student@Campus.EDU ").unwrap();
    /// assert_eq!(email.as_ref(), "student@campus.edu");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        let mut parts = normalised.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed || normalised.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::MalformedEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account including its stored password hash.
///
/// The hash never leaves the domain; HTTP adapters expose [`AccountProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: UserId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountProfile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    #[schema(value_type = String, example = "student@campus.edu")]
    pub email: Email,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
        }
    }
}
