//! Campus guide backend library.
//!
//! Hexagonal layout: [`domain`] holds the model, services, and ports;
//! [`inbound`] and [`outbound`] hold the adapters; [`server`] wires them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
