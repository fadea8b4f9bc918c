//! Embedded schema migrations.
//!
//! Migrations run on a dedicated synchronous connection inside
//! `spawn_blocking`, before the pool serves any repository.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Embedded migrations from the backend/migrations directory.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database file could not be opened.
    #[error("failed to open database for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking task panicked or was cancelled.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply every pending migration to the SQLite file at `database_url`.
///
/// Returns the number of migrations applied; zero when the schema is
/// already current.
///
/// # Errors
///
/// Returns [`MigrationError`] when the file cannot be opened or a migration
/// fails.
pub async fn run_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let database_url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = SqliteConnection::establish(&database_url).map_err(|err| {
            MigrationError::Connect {
                message: err.to_string(),
            }
        })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })??;

    info!(applied, "database migrations complete");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn second_run_applies_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("store.db");
        let url = url.to_string_lossy();

        let first = run_migrations(&url).await.expect("first run");
        let second = run_migrations(&url).await.expect("second run");

        assert!(first >= 1);
        assert_eq!(second, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn unopenable_path_is_a_connect_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let url = dir.path().join("missing").join("store.db");

        let result = run_migrations(&url.to_string_lossy()).await;

        assert!(matches!(result, Err(MigrationError::Connect { .. })));
    }
}
