//! Driving port for food listing mutations.

use async_trait::async_trait;

use crate::domain::{Error, FoodId, FoodListingDraft};

/// Use-case port for adding and removing listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FoodListingCommand: Send + Sync {
    /// Validate and insert a listing, returning its stored identifier.
    async fn add(&self, draft: FoodListingDraft) -> Result<FoodId, Error>;

    /// Remove the listing with `food_id`. Fails with a not-found error when
    /// no such listing exists.
    async fn delete(&self, food_id: FoodId) -> Result<(), Error>;
}
