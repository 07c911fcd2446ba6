//! Credentials submitted for registration and login.
//!
//! Passwords are wrapped in [`Zeroizing`] so they are wiped once dropped.

use zeroize::Zeroizing;

use super::user::{AccountValidationError, Email};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Reasons a credential payload is rejected before touching a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error(transparent)]
    Email(#[from] AccountValidationError),
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

/// Email and password pair.
///
/// ## Invariants
/// - `email` is normalised (see [`Email::new`]).
/// - `password` is non-empty and keeps caller whitespace untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Credentials for logging in: any non-empty password is accepted.
    pub fn for_login(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Credentials for a new account: enforces the minimum password length.
    ///
    /// # Examples
    /// ```
    /// use campus_guide::domain::{Credentials, CredentialsValidationError};
    ///
    /// assert!(Credentials::for_registration("a@b.c", "long enough").is_ok());
    /// assert_eq!(
    ///     Credentials::for_registration("a@b.c", "short"),
    ///     Err(CredentialsValidationError::PasswordTooShort { min: 8 }),
    /// );
    /// ```
    pub fn for_registration(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let credentials = Self::for_login(email, password)?;
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(credentials)
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
