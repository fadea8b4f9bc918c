//! Driven port for reading whole tables from an external source.

use crate::domain::{SourceTable, TableBatch};

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading a table source.
    pub enum TableSourceError {
        /// No source exists for the table.
        Missing { location: String } =>
            "table source {location} not found",
        /// The source exists but could not be read.
        Read { message: String } =>
            "table source read failed: {message}",
        /// The header lacks a required column.
        Header { message: String } =>
            "table source header invalid: {message}",
        /// A data row could not be decoded.
        Row { message: String } =>
            "table source row invalid: {message}",
    }
}

/// Port for obtaining the full contents of one table.
#[cfg_attr(test, mockall::automock)]
pub trait TableSource: Send + Sync {
    /// Read every row for `table`.
    fn read(&self, table: SourceTable) -> Result<TableBatch, TableSourceError>;
}
