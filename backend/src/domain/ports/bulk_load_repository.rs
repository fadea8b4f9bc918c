//! Driven port for replacing stored tables wholesale.

use async_trait::async_trait;

use crate::domain::TableBatch;

use super::define_port_error;

define_port_error! {
    /// Errors raised by bulk load repository adapters.
    pub enum BulkLoadRepositoryError {
        /// The store could not be opened or a connection checked out.
        Connection { message: String } =>
            "bulk load connection failed: {message}",
        /// A statement failed; the table keeps its previous rows.
        Query { message: String } =>
            "bulk load write failed: {message}",
    }
}

/// Port for replacing the contents of one table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BulkLoadRepository: Send + Sync {
    /// Delete every stored row of the batch's table and insert the batch,
    /// atomically. Returns the number of rows inserted.
    async fn replace_table(&self, batch: &TableBatch) -> Result<usize, BulkLoadRepositoryError>;
}
