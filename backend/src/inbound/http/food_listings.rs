//! Food listing endpoints.
//!
//! ```text
//! GET    /api/v1/food-listings/{id}
//! POST   /api/v1/food-listings
//! DELETE /api/v1/food-listings/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Serialize;

use crate::domain::ports::QueryOutcome;
use crate::domain::{Error, FoodId, FoodListingDraft, ReportQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_food_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Body returned after a listing is created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    /// Identifier of the stored listing.
    pub food_id: FoodId,
}

fn listing_or_error(food_id: FoodId, outcome: QueryOutcome) -> ApiResult<QueryOutcome> {
    if outcome.is_error() {
        let message = outcome
            .notice
            .map_or_else(|| "food listing lookup failed".to_owned(), |n| n.message);
        return Err(Error::service_unavailable(message));
    }
    if outcome.table.is_empty() {
        return Err(Error::not_found(format!("food listing {food_id} not found")));
    }
    Ok(outcome)
}

/// Fetch one listing.
#[get("/food-listings/{id}")]
pub async fn get_food_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let food_id = parse_food_id(&path.into_inner(), ID_FIELD)?;
    let outcome = state
        .reports
        .run(ReportQuery::FoodListingById { food_id })
        .await;
    let outcome = listing_or_error(food_id, outcome)?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(outcome))
}

/// Validate and store a new listing.
#[post("/food-listings")]
pub async fn add_food_listing(
    state: web::Data<HttpState>,
    payload: web::Json<FoodListingDraft>,
) -> ApiResult<HttpResponse> {
    let food_id = state.food_listings.add(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(CreatedResponse { food_id }))
}

/// Remove a listing.
#[delete("/food-listings/{id}")]
pub async fn delete_food_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let food_id = parse_food_id(&path.into_inner(), ID_FIELD)?;
    state.food_listings.delete(food_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "food_listings_tests.rs"]
mod tests;
