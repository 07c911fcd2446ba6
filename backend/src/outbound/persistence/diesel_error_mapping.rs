//! Diesel and pool error translation shared by the repositories.
//!
//! Each repository passes its own `connection`/`query` constructors so the
//! port error types stay independent of Diesel.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a repository connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.message().to_owned())
}

/// Return `true` for unique-constraint violations.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Map a Diesel failure onto repository `query` or `connection` errors.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(String) -> E,
    connection: impl FnOnce(String) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => query(info.message().to_owned()),
        other => query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Query(String),
        Connection(String),
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Probe::Connection);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_becomes_query_error() {
        let mapped = map_diesel_error(DieselError::NotFound, Probe::Query, Probe::Connection);
        assert_eq!(mapped, Probe::Query("record not found".to_owned()));
    }

    #[rstest]
    fn rollback_failures_become_query_errors() {
        let mapped = map_diesel_error(
            DieselError::RollbackTransaction,
            Probe::Query,
            Probe::Connection,
        );
        assert!(matches!(mapped, Probe::Query(_)));
    }

    #[rstest]
    fn only_database_errors_can_be_unique_violations() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
