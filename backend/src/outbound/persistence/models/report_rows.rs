//! `QueryableByName` rows for catalog queries.
//!
//! Catalog SQL aliases its output columns to the field names below
//! (`label`, `value`, ...). Each row flattens into domain [`Cell`]s in the
//! column order the catalog declares.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text};

use crate::domain::Cell;

/// Conversion from a Diesel row into ordered report cells.
pub(crate) trait IntoCells {
    fn into_cells(self) -> Vec<Cell>;
}

/// Single count.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

impl IntoCells for CountRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.total.into()]
    }
}

/// Single aggregate that is `NULL` over zero rows.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct NullableTotalRow {
    #[diesel(sql_type = Nullable<BigInt>)]
    pub total: Option<i64>,
}

impl IntoCells for NullableTotalRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.total.into()]
    }
}

/// Single text column.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LabelRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub label: Option<String>,
}

impl IntoCells for LabelRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.label.into()]
    }
}

/// Text label with a row count.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LabelCountRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub label: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub value: i64,
}

impl IntoCells for LabelCountRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.label.into(), self.value.into()]
    }
}

/// Text label with an integer sum.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LabelSumRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub label: Option<String>,
    #[diesel(sql_type = Nullable<BigInt>)]
    pub value: Option<i64>,
}

impl IntoCells for LabelSumRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.label.into(), self.value.into()]
    }
}

/// Text label with a rounded real value.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct LabelRealRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub label: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub value: Option<f64>,
}

impl IntoCells for LabelRealRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.label.into(), self.value.into()]
    }
}

/// Two text columns (name and contact, food and expiry date).
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct TextPairRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub first: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub second: Option<String>,
}

impl IntoCells for TextPairRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.first.into(), self.second.into()]
    }
}

/// Provider and receiver head counts for one city.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CityBreakdownRow {
    #[diesel(sql_type = Nullable<Text>)]
    pub city: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub providers: i64,
    #[diesel(sql_type = BigInt)]
    pub receivers: i64,
}

impl IntoCells for CityBreakdownRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![self.city.into(), self.providers.into(), self.receivers.into()]
    }
}

/// Claim joined with its food and receiver names.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ClaimOverviewRow {
    #[diesel(sql_type = Integer)]
    pub claim_id: i32,
    #[diesel(sql_type = Nullable<Text>)]
    pub food_name: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub receiver: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub status: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub claimed_at: Option<String>,
}

impl IntoCells for ClaimOverviewRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.claim_id.into(),
            self.food_name.into(),
            self.receiver.into(),
            self.status.into(),
            self.claimed_at.into(),
        ]
    }
}

/// Every stored column of one listing.
#[derive(Debug, QueryableByName)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct FoodListingRow {
    #[diesel(sql_type = Integer)]
    pub food_id: i32,
    #[diesel(sql_type = Nullable<Text>)]
    pub food_name: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub quantity: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub expiry_date: Option<String>,
    #[diesel(sql_type = Nullable<Integer>)]
    pub provider_id: Option<i32>,
    #[diesel(sql_type = Nullable<Text>)]
    pub provider_type: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub location: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub food_type: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub meal_type: Option<String>,
}

impl IntoCells for FoodListingRow {
    fn into_cells(self) -> Vec<Cell> {
        vec![
            self.food_id.into(),
            self.food_name.into(),
            self.quantity.into(),
            self.expiry_date.into(),
            self.provider_id.into(),
            self.provider_type.into(),
            self.location.into(),
            self.food_type.into(),
            self.meal_type.into(),
        ]
    }
}
