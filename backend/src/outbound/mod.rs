//! Outbound adapters implementing the driven domain ports.
//!
//! - **gemini**: completion service over the Generative Language HTTP API.
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process stores for database-less runs and tests.
//! - **password** and **random**: local capability adapters.
//!
//! Adapters translate between domain and infrastructure types and hold no
//! business rules.

pub mod gemini;
pub mod memory;
pub mod password;
pub mod persistence;
pub mod random;
