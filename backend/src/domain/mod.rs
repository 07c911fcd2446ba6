//! Domain model and services.
//!
//! Types here know nothing about HTTP or SQL. Inbound adapters call the
//! driving ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Location`], [`College`], [`CampusSeed`]: campus reference data.
//! - [`classify`] and [`CampusGuideService`]: the reply pipeline.
//! - [`AccountService`], [`Credentials`], [`Account`]: sign-in.
//! - [`Error`], [`ErrorCode`], [`TraceId`]: shared error envelope.

pub mod account_service;
pub mod auth;
pub mod classifier;
pub mod error;
pub mod fallback;
pub mod guide;
pub mod location;
pub mod ports;
pub mod prompts;
pub mod seed;
mod slug;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError, PASSWORD_MIN_LENGTH};
pub use self::classifier::{LOCATION_KEYWORDS, QueryClassification, classify};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::fallback::{conversation_fallback, fallback_line};
pub use self::guide::{CampusGuideService, GuideQuery, GuideQueryError, GuideReply};
pub use self::location::{College, Direction, Location, LocationId, LocationValidationError};
pub use self::seed::CampusSeed;
pub use self::trace_id::TraceId;
pub use self::user::{Account, AccountProfile, AccountValidationError, Email, UserId};
