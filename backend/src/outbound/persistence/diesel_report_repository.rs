//! SQLite-backed `ReportRepository` implementation.
//!
//! Catalog queries are aggregate SQL over the four tables, so they run as
//! raw `sql_query` statements with bound parameters and load into the
//! `QueryableByName` rows from [`super::models::report_rows`]. Parameters
//! (city, reference date, id) are always bound, never interpolated.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::{Integer, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReportRepository, ReportRepositoryError};
use crate::domain::{ReportQuery, ReportTable};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, map_pool_error_message};
use super::models::report_rows::{
    CityBreakdownRow, ClaimOverviewRow, CountRow, FoodListingRow, IntoCells, LabelCountRow,
    LabelRealRow, LabelRow, LabelSumRow, NullableTotalRow, TextPairRow,
};
use super::pool::{DbPool, PoolError};

mod sql {
    pub(super) const TOTAL_PROVIDERS: &str = "SELECT COUNT(*) AS total FROM Providers";

    pub(super) const TOTAL_RECEIVERS: &str = "SELECT COUNT(*) AS total FROM Receivers";

    pub(super) const TOTAL_FOOD_QUANTITY: &str =
        "SELECT SUM(Quantity) AS total FROM Food_Listings";

    pub(super) const QUANTITY_BY_CITY: &str = "\
        SELECT Location AS label, SUM(Quantity) AS value \
        FROM Food_Listings \
        GROUP BY Location";

    // Receiver counts come from a correlated lookup per provider city, so
    // cities with receivers but no providers are absent.
    pub(super) const PROVIDERS_AND_RECEIVERS_BY_CITY: &str = "\
        SELECT p.City AS city, \
               COUNT(DISTINCT p.Provider_ID) AS providers, \
               (SELECT COUNT(DISTINCT r.Receiver_ID) FROM Receivers r WHERE r.City = p.City) \
                   AS receivers \
        FROM Providers p \
        GROUP BY p.City";

    pub(super) const TOP_PROVIDER_TYPE: &str = "\
        SELECT Type AS label, COUNT(*) AS value \
        FROM Providers \
        GROUP BY Type \
        ORDER BY value DESC \
        LIMIT 1";

    pub(super) const PROVIDER_CITIES: &str =
        "SELECT DISTINCT City AS label FROM Providers WHERE City IS NOT NULL";

    pub(super) const PROVIDER_CONTACTS_BY_CITY: &str =
        "SELECT Name AS first, Contact AS second FROM Providers WHERE City = ?";

    pub(super) const TOP_RECEIVERS_BY_CLAIMS: &str = "\
        SELECT r.Name AS label, COUNT(c.Claim_ID) AS value \
        FROM Claims c \
        JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID \
        GROUP BY r.Name \
        ORDER BY value DESC";

    pub(super) const CITY_WITH_MOST_LISTINGS: &str = "\
        SELECT Location AS label, COUNT(*) AS value \
        FROM Food_Listings \
        GROUP BY Location \
        ORDER BY value DESC \
        LIMIT 1";

    pub(super) const MOST_COMMON_FOOD_TYPES: &str = "\
        SELECT Food_Type AS label, COUNT(*) AS value \
        FROM Food_Listings \
        GROUP BY Food_Type \
        ORDER BY value DESC";

    pub(super) const CLAIMS_PER_FOOD_ITEM: &str = "\
        SELECT f.Food_Name AS label, COUNT(c.Claim_ID) AS value \
        FROM Claims c \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        GROUP BY f.Food_Name";

    pub(super) const TOP_PROVIDER_BY_SUCCESSFUL_CLAIMS: &str = "\
        SELECT p.Name AS label, COUNT(c.Claim_ID) AS value \
        FROM Claims c \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        JOIN Providers p ON f.Provider_ID = p.Provider_ID \
        WHERE c.Status = 'Completed' \
        GROUP BY p.Name \
        ORDER BY value DESC \
        LIMIT 1";

    pub(super) const CLAIM_STATUS_PERCENTAGES: &str = "\
        SELECT Status AS label, \
               ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM Claims), 2) AS value \
        FROM Claims \
        GROUP BY Status";

    pub(super) const AVERAGE_QUANTITY_PER_RECEIVER: &str = "\
        SELECT r.Name AS label, ROUND(AVG(f.Quantity), 2) AS value \
        FROM Claims c \
        JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        GROUP BY r.Name";

    pub(super) const MOST_CLAIMED_MEAL_TYPE: &str = "\
        SELECT f.Meal_Type AS label, COUNT(*) AS value \
        FROM Claims c \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        GROUP BY f.Meal_Type \
        ORDER BY value DESC \
        LIMIT 1";

    pub(super) const TOTAL_DONATED_BY_PROVIDER: &str = "\
        SELECT p.Name AS label, SUM(f.Quantity) AS value \
        FROM Food_Listings f \
        JOIN Providers p ON f.Provider_ID = p.Provider_ID \
        GROUP BY p.Name";

    pub(super) const TOP_CITY_BY_COMPLETED_CLAIMS: &str = "\
        SELECT f.Location AS label, COUNT(*) AS value \
        FROM Claims c \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        WHERE c.Status = 'Completed' \
        GROUP BY f.Location \
        ORDER BY value DESC \
        LIMIT 1";

    pub(super) const EXPIRED_FOOD_ITEMS: &str = "\
        SELECT Food_Name AS first, Expiry_Date AS second \
        FROM Food_Listings \
        WHERE DATE(Expiry_Date) < DATE(?)";

    pub(super) const CLAIMS_OVERVIEW: &str = "\
        SELECT c.Claim_ID AS claim_id, f.Food_Name AS food_name, r.Name AS receiver, \
               c.Status AS status, c.Timestamp AS claimed_at \
        FROM Claims c \
        JOIN Food_Listings f ON c.Food_ID = f.Food_ID \
        JOIN Receivers r ON c.Receiver_ID = r.Receiver_ID";

    pub(super) const LISTING_CITIES: &str =
        "SELECT DISTINCT Location AS label FROM Food_Listings WHERE Location IS NOT NULL";

    pub(super) const FOOD_LISTINGS: &str = "\
        SELECT Food_ID AS food_id, Food_Name AS food_name, Quantity AS quantity, \
               Expiry_Date AS expiry_date, Provider_ID AS provider_id, \
               Provider_Type AS provider_type, Location AS location, \
               Food_Type AS food_type, Meal_Type AS meal_type \
        FROM Food_Listings";

    pub(super) const FOOD_LISTINGS_BY_LOCATION: &str = "\
        SELECT Food_ID AS food_id, Food_Name AS food_name, Quantity AS quantity, \
               Expiry_Date AS expiry_date, Provider_ID AS provider_id, \
               Provider_Type AS provider_type, Location AS location, \
               Food_Type AS food_type, Meal_Type AS meal_type \
        FROM Food_Listings \
        WHERE Location = ?";

    pub(super) const FOOD_LISTING_BY_ID: &str = "\
        SELECT Food_ID AS food_id, Food_Name AS food_name, Quantity AS quantity, \
               Expiry_Date AS expiry_date, Provider_ID AS provider_id, \
               Provider_Type AS provider_type, Location AS location, \
               Food_Type AS food_type, Meal_Type AS meal_type \
        FROM Food_Listings \
        WHERE Food_ID = ?";
}

/// Diesel-backed implementation of the report repository port.
#[derive(Clone)]
pub struct DieselReportRepository {
    pool: DbPool,
}

impl DieselReportRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReportRepositoryError {
    ReportRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ReportRepositoryError {
    match classify_diesel_error(error, "report query") {
        DieselFailure::Connection(message) => ReportRepositoryError::connection(message),
        DieselFailure::UniqueViolation(message) | DieselFailure::Query(message) => {
            ReportRepositoryError::query(message)
        }
    }
}

fn into_table<R: IntoCells>(query: &ReportQuery, rows: Vec<R>) -> ReportTable {
    ReportTable::from_rows(
        query.kind().columns(),
        rows.into_iter().map(IntoCells::into_cells).collect(),
    )
}

/// Load `$statement` as rows of `$row` and wrap them in the catalog table.
macro_rules! load_report {
    ($conn:expr, $query:expr, $row:ty, $statement:expr) => {{
        let rows: Vec<$row> = $statement
            .load($conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(into_table($query, rows))
    }};
}

#[async_trait]
impl ReportRepository for DieselReportRepository {
    async fn run(&self, query: &ReportQuery) -> Result<ReportTable, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let conn = &mut *conn;

        match query {
            ReportQuery::TotalProviders => {
                load_report!(conn, query, CountRow, sql_query(sql::TOTAL_PROVIDERS))
            }
            ReportQuery::TotalReceivers => {
                load_report!(conn, query, CountRow, sql_query(sql::TOTAL_RECEIVERS))
            }
            ReportQuery::TotalFoodQuantity => load_report!(
                conn,
                query,
                NullableTotalRow,
                sql_query(sql::TOTAL_FOOD_QUANTITY)
            ),
            ReportQuery::QuantityByCity => {
                load_report!(conn, query, LabelSumRow, sql_query(sql::QUANTITY_BY_CITY))
            }
            ReportQuery::ProvidersAndReceiversByCity => load_report!(
                conn,
                query,
                CityBreakdownRow,
                sql_query(sql::PROVIDERS_AND_RECEIVERS_BY_CITY)
            ),
            ReportQuery::TopProviderType => {
                load_report!(conn, query, LabelCountRow, sql_query(sql::TOP_PROVIDER_TYPE))
            }
            ReportQuery::ProviderCities => {
                load_report!(conn, query, LabelRow, sql_query(sql::PROVIDER_CITIES))
            }
            ReportQuery::ProviderContactsByCity { city } => load_report!(
                conn,
                query,
                TextPairRow,
                sql_query(sql::PROVIDER_CONTACTS_BY_CITY).bind::<Text, _>(city.as_str())
            ),
            ReportQuery::TopReceiversByClaims => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::TOP_RECEIVERS_BY_CLAIMS)
            ),
            ReportQuery::CityWithMostListings => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::CITY_WITH_MOST_LISTINGS)
            ),
            ReportQuery::MostCommonFoodTypes => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::MOST_COMMON_FOOD_TYPES)
            ),
            ReportQuery::ClaimsPerFoodItem => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::CLAIMS_PER_FOOD_ITEM)
            ),
            ReportQuery::TopProviderBySuccessfulClaims => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::TOP_PROVIDER_BY_SUCCESSFUL_CLAIMS)
            ),
            ReportQuery::ClaimStatusPercentages => load_report!(
                conn,
                query,
                LabelRealRow,
                sql_query(sql::CLAIM_STATUS_PERCENTAGES)
            ),
            ReportQuery::AverageQuantityPerReceiver => load_report!(
                conn,
                query,
                LabelRealRow,
                sql_query(sql::AVERAGE_QUANTITY_PER_RECEIVER)
            ),
            ReportQuery::MostClaimedMealType => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::MOST_CLAIMED_MEAL_TYPE)
            ),
            ReportQuery::TotalDonatedByProvider => load_report!(
                conn,
                query,
                LabelSumRow,
                sql_query(sql::TOTAL_DONATED_BY_PROVIDER)
            ),
            ReportQuery::TopCityByCompletedClaims => load_report!(
                conn,
                query,
                LabelCountRow,
                sql_query(sql::TOP_CITY_BY_COMPLETED_CLAIMS)
            ),
            ReportQuery::ExpiredFoodItems { today } => load_report!(
                conn,
                query,
                TextPairRow,
                sql_query(sql::EXPIRED_FOOD_ITEMS)
                    .bind::<Text, _>(today.format("%Y-%m-%d").to_string())
            ),
            ReportQuery::ClaimsOverview => {
                load_report!(conn, query, ClaimOverviewRow, sql_query(sql::CLAIMS_OVERVIEW))
            }
            ReportQuery::ListingCities => {
                load_report!(conn, query, LabelRow, sql_query(sql::LISTING_CITIES))
            }
            ReportQuery::FoodListings { location: None } => {
                load_report!(conn, query, FoodListingRow, sql_query(sql::FOOD_LISTINGS))
            }
            ReportQuery::FoodListings {
                location: Some(location),
            } => load_report!(
                conn,
                query,
                FoodListingRow,
                sql_query(sql::FOOD_LISTINGS_BY_LOCATION).bind::<Text, _>(location.as_str())
            ),
            ReportQuery::FoodListingById { food_id } => load_report!(
                conn,
                query,
                FoodListingRow,
                sql_query(sql::FOOD_LISTING_BY_ID).bind::<Integer, _>(food_id.get())
            ),
        }
    }
}
