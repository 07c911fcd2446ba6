//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod cors;
pub mod error;
pub mod guide;
pub mod health;
pub mod locations;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
