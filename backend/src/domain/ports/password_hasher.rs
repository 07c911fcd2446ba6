//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or checking a password.
    pub enum PasswordHasherError {
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
        /// The key derivation could not be set up.
        Derivation { message: String } => "password key derivation failed: {message}",
    }
}

/// Hashes passwords and checks candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a self-describing encoded hash for `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Return whether `password` matches `encoded`.
    fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordHasherError>;
}
