//! Shared helpers for Diesel repository implementations.
//!
//! Repositories keep their own port-specific error mapping; these helpers
//! classify Diesel and pool failures so that mapping stays a short `match`.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// How a Diesel failure should surface through a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection is gone or the file cannot be used.
    Connection(String),
    /// A uniqueness or primary-key constraint rejected the write.
    UniqueViolation(String),
    /// Any other statement failure.
    Query(String),
}

/// Extract a readable message from a pool error.
pub(crate) fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error and emit debug context.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &str) -> DieselFailure {
    let message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%message, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation(message)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection(message)
        }
        _ if is_unavailable_message(&message) => DieselFailure::Connection(message),
        _ => DieselFailure::Query(message),
    }
}

/// SQLite reports an unusable file through generic errors; match the text.
fn is_unavailable_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("unable to open database file")
        || lower.contains("disk i/o error")
        || lower.contains("file is not a database")
}
