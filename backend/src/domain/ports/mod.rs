//! Domain ports: traits at the hexagon edge implemented by adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod campus_guide_query;
mod completion_service;
mod credential_store;
mod location_repository;
mod password_hasher;
mod random_source;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use campus_guide_query::MockCampusGuideQuery;
pub use campus_guide_query::CampusGuideQuery;
#[cfg(test)]
pub use completion_service::MockCompletionService;
pub use completion_service::{
    CompletionService, CompletionServiceError, DisabledCompletionService,
};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use location_repository::MockLocationRepository;
pub use location_repository::{LocationRepository, LocationRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use random_source::MockRandomSource;
pub use random_source::{FixedRandomSource, RandomSource};
