//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TableSource`]) are implemented by outbound
//! adapters; driving ports (`*Query`, `*Command`) are what inbound adapters
//! call.

mod macros;
pub(crate) use macros::define_port_error;

mod bulk_load_command;
mod bulk_load_repository;
mod food_listing_command;
mod food_listing_repository;
mod report_repository;
mod reports_query;
mod table_source;

pub use bulk_load_command::BulkLoadCommand;
#[cfg(test)]
pub use bulk_load_repository::MockBulkLoadRepository;
pub use bulk_load_repository::{BulkLoadRepository, BulkLoadRepositoryError};
#[cfg(test)]
pub use food_listing_command::MockFoodListingCommand;
pub use food_listing_command::FoodListingCommand;
#[cfg(test)]
pub use food_listing_repository::MockFoodListingRepository;
pub use food_listing_repository::{
    DeleteOutcome, FoodListingRepository, FoodListingRepositoryError,
    UnavailableFoodListingRepository,
};
#[cfg(test)]
pub use report_repository::MockReportRepository;
pub use report_repository::{
    FixtureReportRepository, ReportRepository, ReportRepositoryError,
    UnavailableReportRepository,
};
#[cfg(test)]
pub use reports_query::MockReportsQuery;
pub use reports_query::{QueryOutcome, ReportView, ReportsQuery};
#[cfg(test)]
pub use table_source::MockTableSource;
pub use table_source::{TableSource, TableSourceError};
