//! Driven port for food listing mutations.

use async_trait::async_trait;

use crate::domain::{FoodId, NewFoodListing};

use super::define_port_error;

define_port_error! {
    /// Errors raised by food listing repository adapters.
    pub enum FoodListingRepositoryError {
        /// The store could not be opened or a connection checked out.
        Connection { message: String } =>
            "food listing repository connection failed: {message}",
        /// The statement failed while executing.
        Query { message: String } =>
            "food listing repository query failed: {message}",
        /// A listing with the requested identifier already exists.
        Duplicate { food_id: FoodId } =>
            "food listing {food_id} already exists",
    }
}

/// Result of a delete that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The listing existed and was removed.
    Deleted,
    /// No listing had the identifier.
    NotFound,
}

/// Port for inserting and deleting food listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListingRepository: Send + Sync {
    /// Insert one listing and return the stored identifier.
    async fn insert(&self, listing: &NewFoodListing) -> Result<FoodId, FoodListingRepositoryError>;

    /// Delete the listing with `food_id`, checking existence in the same
    /// transaction.
    async fn delete(&self, food_id: FoodId) -> Result<DeleteOutcome, FoodListingRepositoryError>;
}

/// Stand-in used when the store could not be opened at startup.
#[derive(Debug, Clone)]
pub struct UnavailableFoodListingRepository {
    message: String,
}

impl UnavailableFoodListingRepository {
    /// Create the stand-in with the startup failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl FoodListingRepository for UnavailableFoodListingRepository {
    async fn insert(
        &self,
        _listing: &NewFoodListing,
    ) -> Result<FoodId, FoodListingRepositoryError> {
        Err(FoodListingRepositoryError::connection(self.message.clone()))
    }

    async fn delete(&self, _food_id: FoodId) -> Result<DeleteOutcome, FoodListingRepositoryError> {
        Err(FoodListingRepositoryError::connection(self.message.clone()))
    }
}
