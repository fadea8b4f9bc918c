//! Food listing mutation service implementing [`FoodListingCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    DeleteOutcome, FoodListingCommand, FoodListingRepository, FoodListingRepositoryError,
};
use crate::domain::{Error, FoodId, FoodListingDraft, NewFoodListing};

fn map_repository_error(error: FoodListingRepositoryError) -> Error {
    match error {
        FoodListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("food listing store unavailable: {message}"))
        }
        FoodListingRepositoryError::Query { message } => {
            Error::internal(format!("food listing write failed: {message}"))
        }
        FoodListingRepositoryError::Duplicate { food_id } => {
            Error::conflict(format!("food listing {food_id} already exists"))
                .with_details(json!({ "foodId": food_id }))
        }
    }
}

/// Service validating and persisting listing mutations.
#[derive(Clone)]
pub struct FoodListingService<R> {
    repository: Arc<R>,
}

impl<R> FoodListingService<R> {
    /// Create the service over a listing repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> FoodListingCommand for FoodListingService<R>
where
    R: FoodListingRepository,
{
    async fn add(&self, draft: FoodListingDraft) -> Result<FoodId, Error> {
        let listing = NewFoodListing::try_from(draft).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": err.field() }))
        })?;

        let food_id = self
            .repository
            .insert(&listing)
            .await
            .map_err(map_repository_error)?;

        info!(%food_id, name = listing.food_name(), "food listing added");
        Ok(food_id)
    }

    async fn delete(&self, food_id: FoodId) -> Result<(), Error> {
        match self
            .repository
            .delete(food_id)
            .await
            .map_err(map_repository_error)?
        {
            DeleteOutcome::Deleted => {
                info!(%food_id, "food listing deleted");
                Ok(())
            }
            DeleteOutcome::NotFound => Err(Error::not_found(format!(
                "food listing {food_id} does not exist"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Tests for listing mutations.

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockFoodListingRepository;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> FoodListingDraft {
        FoodListingDraft {
            food_id: None,
            food_name: Some("Bread".to_owned()),
            quantity: Some(5),
            expiry_date: Some("2020-01-01".to_owned()),
            provider_id: Some(1),
            provider_type: Some("Restaurant".to_owned()),
            location: Some("Springfield".to_owned()),
            food_type: Some("Vegetarian".to_owned()),
            meal_type: Some("Breakfast".to_owned()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn add_returns_stored_identifier(draft: FoodListingDraft) {
        let mut repo = MockFoodListingRepository::new();
        repo.expect_insert()
            .withf(|listing| listing.food_name() == "Bread" && listing.quantity() == 5)
            .times(1)
            .return_once(|_| Ok(FoodId::new(42)));
        let service = FoodListingService::new(Arc::new(repo));

        let food_id = service.add(draft).await.expect("listing added");

        assert_eq!(food_id, FoodId::new(42));
    }

    #[rstest]
    #[tokio::test]
    async fn add_rejects_incomplete_draft_without_writing(mut draft: FoodListingDraft) {
        draft.location = None;
        let mut repo = MockFoodListingRepository::new();
        repo.expect_insert().times(0);
        let service = FoodListingService::new(Arc::new(repo));

        let error = service.add(draft).await.expect_err("validation fails");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.details(), Some(&json!({ "field": "Location" })));
    }

    #[rstest]
    #[case(FoodListingRepositoryError::connection("unable to open database file"), ErrorCode::ServiceUnavailable)]
    #[case(FoodListingRepositoryError::query("database is locked"), ErrorCode::InternalError)]
    #[case(FoodListingRepositoryError::duplicate(FoodId::new(7)), ErrorCode::Conflict)]
    #[tokio::test]
    async fn add_maps_repository_errors(
        draft: FoodListingDraft,
        #[case] failure: FoodListingRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockFoodListingRepository::new();
        repo.expect_insert().return_once(move |_| Err(failure));
        let service = FoodListingService::new(Arc::new(repo));

        let error = service.add(draft).await.expect_err("write fails");

        assert_eq!(error.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_existing_listing_succeeds() {
        let mut repo = MockFoodListingRepository::new();
        repo.expect_delete()
            .with(eq(FoodId::new(3)))
            .return_once(|_| Ok(DeleteOutcome::Deleted));
        let service = FoodListingService::new(Arc::new(repo));

        service.delete(FoodId::new(3)).await.expect("deleted");
    }

    #[rstest]
    #[tokio::test]
    async fn delete_missing_listing_is_not_found() {
        let mut repo = MockFoodListingRepository::new();
        repo.expect_delete()
            .return_once(|_| Ok(DeleteOutcome::NotFound));
        let service = FoodListingService::new(Arc::new(repo));

        let error = service
            .delete(FoodId::new(999))
            .await
            .expect_err("missing listing");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
