//! Bulk replacement of the four tables from tabular sources.
//!
//! Tables load in a fixed order (providers, receivers, food listings,
//! claims). Each table is replaced independently: a missing source skips
//! that table, a failed read or write leaves that table untouched, and the
//! remaining tables still load.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use super::ports::{
    BulkLoadCommand, BulkLoadRepository, TableSource, TableSourceError,
};

/// One of the four stored tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceTable {
    /// Donors.
    #[serde(rename = "Providers")]
    Providers,
    /// Recipients.
    #[serde(rename = "Receivers")]
    Receivers,
    /// Offered food items.
    #[serde(rename = "Food_Listings")]
    FoodListings,
    /// Receiver claims on listings.
    #[serde(rename = "Claims")]
    Claims,
}

impl SourceTable {
    /// Load order.
    pub const ALL: [Self; 4] = [
        Self::Providers,
        Self::Receivers,
        Self::FoodListings,
        Self::Claims,
    ];

    /// Stored table name.
    pub const fn table_name(self) -> &'static str {
        match self {
            Self::Providers => "Providers",
            Self::Receivers => "Receivers",
            Self::FoodListings => "Food_Listings",
            Self::Claims => "Claims",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Provider row as loaded from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    /// Primary key.
    pub provider_id: i32,
    /// Display name.
    pub name: Option<String>,
    /// Provider category (restaurant, supermarket, ...).
    pub provider_type: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Contact detail.
    pub contact: Option<String>,
}

/// Receiver row as loaded from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiverRecord {
    /// Primary key.
    pub receiver_id: i32,
    /// Display name.
    pub name: Option<String>,
    /// Receiver category (shelter, charity, ...).
    pub receiver_type: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Contact detail.
    pub contact: Option<String>,
}

/// Food listing row as loaded from a source.
///
/// `expiry_date` holds normalised `YYYY-MM-DD` text; sources reject
/// values that do not parse as a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodListingRecord {
    /// Primary key.
    pub food_id: i32,
    /// Item name.
    pub food_name: Option<String>,
    /// Listed quantity.
    pub quantity: Option<i32>,
    /// Expiry date text.
    pub expiry_date: Option<String>,
    /// Owning provider.
    pub provider_id: Option<i32>,
    /// Provider category.
    pub provider_type: Option<String>,
    /// City.
    pub location: Option<String>,
    /// Dietary category.
    pub food_type: Option<String>,
    /// Meal slot.
    pub meal_type: Option<String>,
}

/// Claim row as loaded from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Primary key.
    pub claim_id: i32,
    /// Claimed listing.
    pub food_id: Option<i32>,
    /// Claiming receiver.
    pub receiver_id: Option<i32>,
    /// Pending, Completed or Cancelled.
    pub status: Option<String>,
    /// Claim time as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: Option<String>,
}

/// Full contents of one table, ready to replace the stored rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBatch {
    /// Providers rows.
    Providers(Vec<ProviderRecord>),
    /// Receivers rows.
    Receivers(Vec<ReceiverRecord>),
    /// Food_Listings rows.
    FoodListings(Vec<FoodListingRecord>),
    /// Claims rows.
    Claims(Vec<ClaimRecord>),
}

impl TableBatch {
    /// Table the rows belong to.
    pub fn table(&self) -> SourceTable {
        match self {
            Self::Providers(_) => SourceTable::Providers,
            Self::Receivers(_) => SourceTable::Receivers,
            Self::FoodListings(_) => SourceTable::FoodListings,
            Self::Claims(_) => SourceTable::Claims,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Providers(rows) => rows.len(),
            Self::Receivers(rows) => rows.len(),
            Self::FoodListings(rows) => rows.len(),
            Self::Claims(rows) => rows.len(),
        }
    }

    /// Whether the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What happened to one table during a bulk load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableLoadStatus {
    /// Stored rows were replaced.
    Loaded {
        /// Rows now stored.
        rows: usize,
    },
    /// No source existed; stored rows are unchanged.
    Skipped {
        /// Why the table was skipped.
        reason: String,
    },
    /// Reading or writing failed; stored rows are unchanged.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Per-table outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLoadOutcome {
    /// Table.
    pub table: SourceTable,
    /// Outcome.
    #[serde(flatten)]
    pub status: TableLoadStatus,
}

/// Outcome of a full bulk load, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkLoadReport {
    /// One entry per table.
    pub tables: Vec<TableLoadOutcome>,
}

impl BulkLoadReport {
    /// Whether any table failed.
    pub fn has_failures(&self) -> bool {
        self.tables
            .iter()
            .any(|outcome| matches!(outcome.status, TableLoadStatus::Failed { .. }))
    }

    /// Outcome for one table, if it was attempted.
    pub fn outcome(&self, table: SourceTable) -> Option<&TableLoadStatus> {
        self.tables
            .iter()
            .find(|outcome| outcome.table == table)
            .map(|outcome| &outcome.status)
    }
}

/// Bulk loader wiring a [`TableSource`] to a [`BulkLoadRepository`].
#[derive(Clone)]
pub struct BulkLoadService<S, R> {
    source: Arc<S>,
    repository: Arc<R>,
}

impl<S, R> BulkLoadService<S, R> {
    /// Create the loader.
    pub fn new(source: Arc<S>, repository: Arc<R>) -> Self {
        Self { source, repository }
    }
}

impl<S, R> BulkLoadService<S, R>
where
    S: TableSource,
    R: BulkLoadRepository,
{
    async fn load_table(&self, table: SourceTable) -> TableLoadStatus {
        let batch = match self.source.read(table) {
            Ok(batch) => batch,
            Err(TableSourceError::Missing { location }) => {
                warn!(%table, %location, "source missing; skipping table");
                return TableLoadStatus::Skipped {
                    reason: format!("source {location} not found"),
                };
            }
            Err(error) => {
                warn!(%table, %error, "failed to read source");
                return TableLoadStatus::Failed {
                    message: error.to_string(),
                };
            }
        };

        match self.repository.replace_table(&batch).await {
            Ok(rows) => {
                info!(%table, rows, "table replaced");
                TableLoadStatus::Loaded { rows }
            }
            Err(error) => {
                warn!(%table, %error, "failed to replace table");
                TableLoadStatus::Failed {
                    message: error.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl<S, R> BulkLoadCommand for BulkLoadService<S, R>
where
    S: TableSource,
    R: BulkLoadRepository,
{
    async fn load_all(&self) -> BulkLoadReport {
        let mut report = BulkLoadReport::default();
        for table in SourceTable::ALL {
            let status = self.load_table(table).await;
            report.tables.push(TableLoadOutcome { table, status });
        }
        report
    }
}
