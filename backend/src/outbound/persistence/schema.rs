//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `migrations/` exactly. Stored table and
//! column names follow the CSV headers (`Food_Listings`, `Provider_ID`), so
//! each item carries a `sql_name` mapping to a snake_case Rust identifier.
//! Identifiers are `INTEGER PRIMARY KEY`; every other column is nullable
//! because bulk-loaded data is stored as-is.

diesel::table! {
    /// Food donors.
    #[sql_name = "Providers"]
    providers (provider_id) {
        #[sql_name = "Provider_ID"]
        provider_id -> Integer,
        #[sql_name = "Name"]
        name -> Nullable<Text>,
        /// Provider category (restaurant, grocery store, ...).
        #[sql_name = "Type"]
        provider_type -> Nullable<Text>,
        #[sql_name = "Address"]
        address -> Nullable<Text>,
        #[sql_name = "City"]
        city -> Nullable<Text>,
        #[sql_name = "Contact"]
        contact -> Nullable<Text>,
    }
}

diesel::table! {
    /// Food recipients.
    #[sql_name = "Receivers"]
    receivers (receiver_id) {
        #[sql_name = "Receiver_ID"]
        receiver_id -> Integer,
        #[sql_name = "Name"]
        name -> Nullable<Text>,
        #[sql_name = "Type"]
        receiver_type -> Nullable<Text>,
        #[sql_name = "City"]
        city -> Nullable<Text>,
        #[sql_name = "Contact"]
        contact -> Nullable<Text>,
    }
}

diesel::table! {
    /// Offered food items.
    #[sql_name = "Food_Listings"]
    food_listings (food_id) {
        #[sql_name = "Food_ID"]
        food_id -> Integer,
        #[sql_name = "Food_Name"]
        food_name -> Nullable<Text>,
        #[sql_name = "Quantity"]
        quantity -> Nullable<Integer>,
        /// `YYYY-MM-DD` text.
        #[sql_name = "Expiry_Date"]
        expiry_date -> Nullable<Text>,
        #[sql_name = "Provider_ID"]
        provider_id -> Nullable<Integer>,
        #[sql_name = "Provider_Type"]
        provider_type -> Nullable<Text>,
        #[sql_name = "Location"]
        location -> Nullable<Text>,
        #[sql_name = "Food_Type"]
        food_type -> Nullable<Text>,
        #[sql_name = "Meal_Type"]
        meal_type -> Nullable<Text>,
    }
}

diesel::table! {
    /// Receiver claims on listings.
    #[sql_name = "Claims"]
    claims (claim_id) {
        #[sql_name = "Claim_ID"]
        claim_id -> Integer,
        #[sql_name = "Food_ID"]
        food_id -> Nullable<Integer>,
        #[sql_name = "Receiver_ID"]
        receiver_id -> Nullable<Integer>,
        #[sql_name = "Status"]
        status -> Nullable<Text>,
        /// `YYYY-MM-DD HH:MM:SS` text.
        #[sql_name = "Timestamp"]
        timestamp -> Nullable<Text>,
    }
}
