//! Driven port for executing catalog queries against the store.

use async_trait::async_trait;

use crate::domain::{ReportQuery, ReportTable};

use super::define_port_error;

define_port_error! {
    /// Errors raised by report repository adapters.
    pub enum ReportRepositoryError {
        /// The store could not be opened or a connection checked out.
        Connection { message: String } =>
            "report store connection failed: {message}",
        /// The statement failed while executing.
        Query { message: String } =>
            "report query failed: {message}",
    }
}

/// Port for running one catalog query and returning its rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Execute `query` and return its rows with the catalog column names.
    async fn run(&self, query: &ReportQuery) -> Result<ReportTable, ReportRepositoryError>;
}

/// Fixture repository returning empty tables for every query.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportRepository;

#[async_trait]
impl ReportRepository for FixtureReportRepository {
    async fn run(&self, query: &ReportQuery) -> Result<ReportTable, ReportRepositoryError> {
        Ok(ReportTable::empty(query.kind().columns()))
    }
}

/// Stand-in used when the store could not be opened at startup.
#[derive(Debug, Clone)]
pub struct UnavailableReportRepository {
    message: String,
}

impl UnavailableReportRepository {
    /// Create the stand-in with the startup failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ReportRepository for UnavailableReportRepository {
    async fn run(&self, _query: &ReportQuery) -> Result<ReportTable, ReportRepositoryError> {
        Err(ReportRepositoryError::connection(self.message.clone()))
    }
}
