//! Driving port for the bulk loader.

use async_trait::async_trait;

use crate::domain::BulkLoadReport;

/// Use-case port for replacing every table from its source.
#[async_trait]
pub trait BulkLoadCommand: Send + Sync {
    /// Load all tables in order and report each table's outcome.
    async fn load_all(&self) -> BulkLoadReport;
}
