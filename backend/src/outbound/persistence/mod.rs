//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's driven ports, backed by a single
//! SQLite file through Diesel with async support from `diesel-async`'s
//! `SyncConnectionWrapper` and `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped to each
//!   port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use foodshare::outbound::persistence::{
//!     DbPool, DieselReportRepository, PoolConfig, run_migrations,
//! };
//!
//! run_migrations("food_waste.db").await?;
//! let pool = DbPool::new(PoolConfig::new("food_waste.db")).await?;
//! let reports = DieselReportRepository::new(pool);
//! ```

mod diesel_bulk_load_repository;
mod diesel_food_listing_repository;
pub(crate) mod diesel_helpers;
mod diesel_report_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bulk_load_repository::DieselBulkLoadRepository;
pub use diesel_food_listing_repository::DieselFoodListingRepository;
pub use diesel_report_repository::DieselReportRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
