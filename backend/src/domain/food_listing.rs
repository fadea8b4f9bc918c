//! Food listing write model.
//!
//! Listings are read back through the report catalog; this module only
//! covers the identifiers and the validated shape accepted for inserts.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Integer identifier of a food listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(i32);

impl FoodId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dietary category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodType {
    /// Plant and dairy based.
    Vegetarian,
    /// Contains meat or fish.
    NonVegetarian,
    /// Entirely plant based.
    Vegan,
}

impl FoodType {
    /// Every accepted value.
    pub const ALL: [Self; 3] = [Self::Vegetarian, Self::NonVegetarian, Self::Vegan];

    /// Stored text form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
            Self::Vegan => "Vegan",
        }
    }
}

impl FromStr for FoodType {
    type Err = FoodListingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| FoodListingValidationError::UnknownFoodType(s.to_owned()))
    }
}

/// Meal slot of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
    /// Anything between meals.
    Snacks,
}

impl MealType {
    /// Every accepted value.
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    /// Stored text form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }
}

impl FromStr for MealType {
    type Err = FoodListingValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == s)
            .ok_or_else(|| FoodListingValidationError::UnknownMealType(s.to_owned()))
    }
}

/// Validation failures for a listing draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FoodListingValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    Missing {
        /// Stored column name of the field.
        field: &'static str,
    },
    /// Quantity below zero.
    #[error("Quantity must not be negative (got {0})")]
    NegativeQuantity(i32),
    /// Expiry date not in `YYYY-MM-DD` form.
    #[error("Expiry_Date must be a YYYY-MM-DD date (got {0:?})")]
    InvalidExpiryDate(String),
    /// Food type outside the accepted set.
    #[error("Food_Type must be one of Vegetarian, Non-Vegetarian, Vegan (got {0:?})")]
    UnknownFoodType(String),
    /// Meal type outside the accepted set.
    #[error("Meal_Type must be one of Breakfast, Lunch, Dinner, Snacks (got {0:?})")]
    UnknownMealType(String),
}

impl FoodListingValidationError {
    /// Stored column name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field } => field,
            Self::NegativeQuantity(_) => "Quantity",
            Self::InvalidExpiryDate(_) => "Expiry_Date",
            Self::UnknownFoodType(_) => "Food_Type",
            Self::UnknownMealType(_) => "Meal_Type",
        }
    }
}

/// Unvalidated listing input as received from an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListingDraft {
    /// Explicit identifier; the store assigns one when absent.
    pub food_id: Option<i32>,
    /// Item name.
    pub food_name: Option<String>,
    /// Listed quantity.
    pub quantity: Option<i32>,
    /// Expiry date, `YYYY-MM-DD`.
    pub expiry_date: Option<String>,
    /// Owning provider.
    pub provider_id: Option<i32>,
    /// Provider category copied onto the listing.
    pub provider_type: Option<String>,
    /// City of the listing.
    pub location: Option<String>,
    /// One of the [`FoodType`] names.
    pub food_type: Option<String>,
    /// One of the [`MealType`] names.
    pub meal_type: Option<String>,
}

/// Listing that passed validation and is ready to insert.
///
/// ## Invariants
/// - Text fields are trimmed and non-empty.
/// - `quantity` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFoodListing {
    food_id: Option<FoodId>,
    food_name: String,
    quantity: i32,
    expiry_date: NaiveDate,
    provider_id: i32,
    provider_type: Option<String>,
    location: String,
    food_type: FoodType,
    meal_type: MealType,
}

fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, FoodListingValidationError> {
    let value = value.map(|raw| raw.trim().to_owned()).unwrap_or_default();
    if value.is_empty() {
        return Err(FoodListingValidationError::Missing { field });
    }
    Ok(value)
}

impl TryFrom<FoodListingDraft> for NewFoodListing {
    type Error = FoodListingValidationError;

    fn try_from(draft: FoodListingDraft) -> Result<Self, Self::Error> {
        let food_name = required_text(draft.food_name, "Food_Name")?;
        let quantity = draft
            .quantity
            .ok_or(FoodListingValidationError::Missing { field: "Quantity" })?;
        if quantity < 0 {
            return Err(FoodListingValidationError::NegativeQuantity(quantity));
        }
        let raw_expiry = required_text(draft.expiry_date, "Expiry_Date")?;
        let expiry_date = NaiveDate::parse_from_str(&raw_expiry, "%Y-%m-%d")
            .map_err(|_| FoodListingValidationError::InvalidExpiryDate(raw_expiry.clone()))?;
        let provider_id = draft.provider_id.ok_or(FoodListingValidationError::Missing {
            field: "Provider_ID",
        })?;
        let location = required_text(draft.location, "Location")?;
        let food_type = required_text(draft.food_type, "Food_Type")?.parse()?;
        let meal_type = required_text(draft.meal_type, "Meal_Type")?.parse()?;
        let provider_type = draft
            .provider_type
            .map(|raw| raw.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            food_id: draft.food_id.map(FoodId::new),
            food_name,
            quantity,
            expiry_date,
            provider_id,
            provider_type,
            location,
            food_type,
            meal_type,
        })
    }
}

impl NewFoodListing {
    /// Explicit identifier, if the caller chose one.
    pub fn food_id(&self) -> Option<FoodId> {
        self.food_id
    }

    /// Item name.
    pub fn food_name(&self) -> &str {
        &self.food_name
    }

    /// Listed quantity.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Expiry date.
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Owning provider.
    pub fn provider_id(&self) -> i32 {
        self.provider_id
    }

    /// Provider category, when supplied.
    pub fn provider_type(&self) -> Option<&str> {
        self.provider_type.as_deref()
    }

    /// City of the listing.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Dietary category.
    pub fn food_type(&self) -> FoodType {
        self.food_type
    }

    /// Meal slot.
    pub fn meal_type(&self) -> MealType {
        self.meal_type
    }
}
