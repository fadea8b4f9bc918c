//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Insertables borrow from domain records;
//! report rows live in [`report_rows`].

use diesel::prelude::*;

use crate::domain::{
    ClaimRecord, FoodListingRecord, NewFoodListing, ProviderRecord, ReceiverRecord,
};

use super::schema::{claims, food_listings, providers, receivers};

pub(crate) mod report_rows;

// ---------------------------------------------------------------------------
// Bulk load rows
// ---------------------------------------------------------------------------

/// Insertable provider row. `None` binds SQL `NULL`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = providers)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewProviderRow<'a> {
    pub provider_id: i32,
    pub name: Option<&'a str>,
    pub provider_type: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> From<&'a ProviderRecord> for NewProviderRow<'a> {
    fn from(record: &'a ProviderRecord) -> Self {
        Self {
            provider_id: record.provider_id,
            name: record.name.as_deref(),
            provider_type: record.provider_type.as_deref(),
            address: record.address.as_deref(),
            city: record.city.as_deref(),
            contact: record.contact.as_deref(),
        }
    }
}

/// Insertable receiver row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = receivers)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewReceiverRow<'a> {
    pub receiver_id: i32,
    pub name: Option<&'a str>,
    pub receiver_type: Option<&'a str>,
    pub city: Option<&'a str>,
    pub contact: Option<&'a str>,
}

impl<'a> From<&'a ReceiverRecord> for NewReceiverRow<'a> {
    fn from(record: &'a ReceiverRecord) -> Self {
        Self {
            receiver_id: record.receiver_id,
            name: record.name.as_deref(),
            receiver_type: record.receiver_type.as_deref(),
            city: record.city.as_deref(),
            contact: record.contact.as_deref(),
        }
    }
}

/// Insertable food listing row carrying an explicit identifier.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_listings)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct LoadedFoodListingRow<'a> {
    pub food_id: i32,
    pub food_name: Option<&'a str>,
    pub quantity: Option<i32>,
    pub expiry_date: Option<&'a str>,
    pub provider_id: Option<i32>,
    pub provider_type: Option<&'a str>,
    pub location: Option<&'a str>,
    pub food_type: Option<&'a str>,
    pub meal_type: Option<&'a str>,
}

impl<'a> From<&'a FoodListingRecord> for LoadedFoodListingRow<'a> {
    fn from(record: &'a FoodListingRecord) -> Self {
        Self {
            food_id: record.food_id,
            food_name: record.food_name.as_deref(),
            quantity: record.quantity,
            expiry_date: record.expiry_date.as_deref(),
            provider_id: record.provider_id,
            provider_type: record.provider_type.as_deref(),
            location: record.location.as_deref(),
            food_type: record.food_type.as_deref(),
            meal_type: record.meal_type.as_deref(),
        }
    }
}

/// Insertable claim row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = claims)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewClaimRow<'a> {
    pub claim_id: i32,
    pub food_id: Option<i32>,
    pub receiver_id: Option<i32>,
    pub status: Option<&'a str>,
    pub timestamp: Option<&'a str>,
}

impl<'a> From<&'a ClaimRecord> for NewClaimRow<'a> {
    fn from(record: &'a ClaimRecord) -> Self {
        Self {
            claim_id: record.claim_id,
            food_id: record.food_id,
            receiver_id: record.receiver_id,
            status: record.status.as_deref(),
            timestamp: record.timestamp.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing mutation rows
// ---------------------------------------------------------------------------

/// Insertable validated listing without an identifier column; the store
/// assigns `Food_ID` unless the caller pairs it with one.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_listings)]
#[diesel(treat_none_as_default_value = false)]
pub(crate) struct NewFoodListingRow<'a> {
    pub food_name: &'a str,
    pub quantity: i32,
    pub expiry_date: String,
    pub provider_id: i32,
    pub provider_type: Option<&'a str>,
    pub location: &'a str,
    pub food_type: &'static str,
    pub meal_type: &'static str,
}

impl<'a> From<&'a NewFoodListing> for NewFoodListingRow<'a> {
    fn from(listing: &'a NewFoodListing) -> Self {
        Self {
            food_name: listing.food_name(),
            quantity: listing.quantity(),
            expiry_date: listing.expiry_date().format("%Y-%m-%d").to_string(),
            provider_id: listing.provider_id(),
            provider_type: listing.provider_type(),
            location: listing.location(),
            food_type: listing.food_type().as_str(),
            meal_type: listing.meal_type().as_str(),
        }
    }
}
