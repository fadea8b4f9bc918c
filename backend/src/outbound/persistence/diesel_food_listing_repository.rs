//! SQLite-backed `FoodListingRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DeleteOutcome, FoodListingRepository, FoodListingRepositoryError};
use crate::domain::{FoodId, NewFoodListing};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::NewFoodListingRow;
use super::pool::{DbPool, PoolError};
use super::schema::food_listings;

/// Diesel-backed implementation of the food listing repository port.
#[derive(Clone)]
pub struct DieselFoodListingRepository {
    pool: DbPool,
}

impl DieselFoodListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FoodListingRepositoryError {
    FoodListingRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> FoodListingRepositoryError {
    match classify_diesel_error(error, "food listing write") {
        DieselFailure::Connection(message) => FoodListingRepositoryError::connection(message),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            FoodListingRepositoryError::query(message)
        }
    }
}

fn map_insert_error(
    error: diesel::result::Error,
    requested_id: Option<FoodId>,
) -> FoodListingRepositoryError {
    match (classify_diesel_error(error, "food listing insert"), requested_id) {
        (DieselFailure::UniqueViolation(_), Some(food_id)) => {
            FoodListingRepositoryError::duplicate(food_id)
        }
        (DieselFailure::Connection(message), _) => FoodListingRepositoryError::connection(message),
        (DieselFailure::UniqueViolation(message) | DieselFailure::Query(message), _) => {
            FoodListingRepositoryError::query(message)
        }
    }
}

#[async_trait]
impl FoodListingRepository for DieselFoodListingRepository {
    async fn insert(&self, listing: &NewFoodListing) -> Result<FoodId, FoodListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFoodListingRow::from(listing);

        let inserted = match listing.food_id() {
            Some(food_id) => {
                diesel::insert_into(food_listings::table)
                    .values((food_listings::food_id.eq(food_id.get()), &row))
                    .returning(food_listings::food_id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
            None => {
                diesel::insert_into(food_listings::table)
                    .values(&row)
                    .returning(food_listings::food_id)
                    .get_result::<i32>(&mut conn)
                    .await
            }
        };

        inserted
            .map(FoodId::new)
            .map_err(|err| map_insert_error(err, listing.food_id()))
    }

    async fn delete(&self, food_id: FoodId) -> Result<DeleteOutcome, FoodListingRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = food_id.get();

        conn.transaction::<DeleteOutcome, diesel::result::Error, _>(|conn| {
            async move {
                let exists: bool = diesel::select(diesel::dsl::exists(
                    food_listings::table.filter(food_listings::food_id.eq(id)),
                ))
                .get_result(conn)
                .await?;
                if !exists {
                    return Ok(DeleteOutcome::NotFound);
                }

                let deleted =
                    diesel::delete(food_listings::table.filter(food_listings::food_id.eq(id)))
                        .execute(conn)
                        .await?;
                Ok(if deleted == 0 {
                    DeleteOutcome::NotFound
                } else {
                    DeleteOutcome::Deleted
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for listing error mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("timed out"));

        assert!(matches!(error, FoodListingRepositoryError::Connection { .. }));
        assert!(error.to_string().contains("timed out"));
    }

    #[rstest]
    fn missing_row_error_maps_to_query_error() {
        let error = map_insert_error(diesel::result::Error::NotFound, Some(FoodId::new(1)));

        assert!(matches!(error, FoodListingRepositoryError::Query { .. }));
    }
}
