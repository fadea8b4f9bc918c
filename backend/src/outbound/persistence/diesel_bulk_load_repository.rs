//! SQLite-backed `BulkLoadRepository` implementation.
//!
//! Each call deletes every row of one table and inserts the batch inside a
//! single transaction, so a failed load leaves the previous contents intact.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::TableBatch;
use crate::domain::ports::{BulkLoadRepository, BulkLoadRepositoryError};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::{LoadedFoodListingRow, NewClaimRow, NewProviderRow, NewReceiverRow};
use super::pool::{DbPool, PoolError};
use super::schema::{claims, food_listings, providers, receivers};

/// Diesel-backed implementation of the bulk load repository port.
#[derive(Clone)]
pub struct DieselBulkLoadRepository {
    pool: DbPool,
}

impl DieselBulkLoadRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BulkLoadRepositoryError {
    BulkLoadRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> BulkLoadRepositoryError {
    match classify_diesel_error(error, "bulk load") {
        DieselFailure::Connection(message) => BulkLoadRepositoryError::connection(message),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            BulkLoadRepositoryError::query(message)
        }
    }
}

/// Clear `$table` and insert every record of `$records` as `$row`.
macro_rules! replace_rows {
    ($conn:expr, $table:expr, $records:expr, $row:ty) => {{
        diesel::delete($table).execute($conn).await?;
        for record in $records {
            diesel::insert_into($table)
                .values(<$row>::from(record))
                .execute($conn)
                .await?;
        }
        Ok($records.len())
    }};
}

#[async_trait]
impl BulkLoadRepository for DieselBulkLoadRepository {
    async fn replace_table(&self, batch: &TableBatch) -> Result<usize, BulkLoadRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            async move {
                match batch {
                    TableBatch::Providers(records) => {
                        replace_rows!(conn, providers::table, records, NewProviderRow<'_>)
                    }
                    TableBatch::Receivers(records) => {
                        replace_rows!(conn, receivers::table, records, NewReceiverRow<'_>)
                    }
                    TableBatch::FoodListings(records) => replace_rows!(
                        conn,
                        food_listings::table,
                        records,
                        LoadedFoodListingRow<'_>
                    ),
                    TableBatch::Claims(records) => {
                        replace_rows!(conn, claims::table, records, NewClaimRow<'_>)
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
