//! Report catalog: the fixed set of read queries and their tabular results.
//!
//! [`ReportKind`] names a catalog entry and carries its static presentation
//! metadata (title, panel shape, column names, empty-state notice).
//! [`ReportQuery`] is an executable request: a kind plus any bound
//! parameters. Repositories turn a `ReportQuery` into a [`ReportTable`].

use chrono::NaiveDate;
use serde::Serialize;

use super::FoodId;

/// Single value inside a report row.
///
/// Serialises untagged so JSON consumers see plain `null`, numbers and
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// SQL `NULL`.
    Null,
    /// Integer value (counts, sums, identifiers).
    Integer(i64),
    /// Floating point value (averages, percentages).
    Real(f64),
    /// Text value.
    Text(String),
}

impl Cell {
    /// Borrow the text payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Integer payload, if this is an integer cell.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64`, if numeric.
    #[expect(
        clippy::cast_precision_loss,
        reason = "report integers are row counts and quantity sums"
    )]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Ordered rows with named columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Table with the given columns and no rows.
    pub fn empty(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|column| (*column).to_owned()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from rows whose cells follow `columns` order.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when a row's width differs from the column
    /// count.
    pub fn from_rows(columns: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.len() == columns.len()),
            "report row width must match column count"
        );
        Self {
            columns: columns.iter().map(|column| (*column).to_owned()).collect(),
            rows,
        }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in result order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.rows.get(row)?.get(index)
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: &str) -> Vec<&Cell> {
        let Some(index) = self.columns.iter().position(|name| name == column) else {
            return Vec::new();
        };
        self.rows.iter().filter_map(|row| row.get(index)).collect()
    }
}

/// How a presentation layer is expected to render a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    /// A single headline value taken from the first row.
    Metric,
    /// A bar chart keyed by the first column.
    BarChart,
    /// A plain data table.
    Table,
    /// A list of choices for a follow-up parameterised query.
    Selector,
}

/// Severity of a user-visible notice attached to a query outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Neutral "no data" state.
    Info,
    /// Positive empty state (nothing expired).
    Success,
    /// The query could not be answered.
    Error,
}

/// Message shown alongside (or instead of) a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

const FOOD_LISTING_COLUMNS: &[&str] = &[
    "Food_ID",
    "Food_Name",
    "Quantity",
    "Expiry_Date",
    "Provider_ID",
    "Provider_Type",
    "Location",
    "Food_Type",
    "Meal_Type",
];

macro_rules! report_kinds {
    (
        $(
            $variant:ident {
                name: $name:literal,
                title: $title:literal,
                panel: $panel:ident,
                columns: $columns:expr,
                metric: $metric:expr,
                empty: $level:ident($empty:literal) $(,)?
            }
        ),* $(,)?
    ) => {
        /// Catalog entry identifier.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum ReportKind {
            $(
                #[doc = $title]
                $variant,
            )*
        }

        impl ReportKind {
            /// Every catalog entry, in catalog order.
            pub const ALL: &'static [ReportKind] = &[$(ReportKind::$variant),*];

            /// Stable kebab-case name used in URLs.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Display title.
            pub fn title(self) -> &'static str {
                match self {
                    $(Self::$variant => $title,)*
                }
            }

            /// Expected rendering.
            pub fn panel(self) -> PanelKind {
                match self {
                    $(Self::$variant => PanelKind::$panel,)*
                }
            }

            /// Result column names, in order.
            pub fn columns(self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => $columns,)*
                }
            }

            /// Column holding the headline value for metric panels.
            pub fn metric_column(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => $metric,)*
                }
            }

            /// Notice rendered when the query returns no rows.
            pub fn empty_notice(self) -> Notice {
                match self {
                    $(Self::$variant => Notice::$level($empty),)*
                }
            }

            /// Resolve a catalog entry from its kebab-case name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.name() == name)
            }
        }
    };
}

report_kinds! {
    TotalProviders {
        name: "total-providers",
        title: "Total Providers",
        panel: Metric,
        columns: &["Total"],
        metric: Some("Total"),
        empty: info("No providers available."),
    },
    TotalReceivers {
        name: "total-receivers",
        title: "Total Receivers",
        panel: Metric,
        columns: &["Total"],
        metric: Some("Total"),
        empty: info("No receivers available."),
    },
    TotalFoodQuantity {
        name: "total-food-quantity",
        title: "Total Food Quantity",
        panel: Metric,
        columns: &["Total_Quantity"],
        metric: Some("Total_Quantity"),
        empty: info("No food listings available."),
    },
    QuantityByCity {
        name: "quantity-by-city",
        title: "Food Quantity by City",
        panel: BarChart,
        columns: &["Location", "Total_Quantity"],
        metric: None,
        empty: info("No food data available to display."),
    },
    ProvidersAndReceiversByCity {
        name: "providers-and-receivers-by-city",
        title: "Providers and Receivers by City",
        panel: BarChart,
        columns: &["City", "Providers", "Receivers"],
        metric: None,
        empty: info("No data available for providers and receivers by city."),
    },
    TopProviderType {
        name: "top-provider-type",
        title: "Most Common Provider Type",
        panel: Metric,
        columns: &["Type", "Count"],
        metric: Some("Type"),
        empty: info("No data available for provider types."),
    },
    ProviderCities {
        name: "provider-cities",
        title: "Provider Cities",
        panel: Selector,
        columns: &["City"],
        metric: None,
        empty: info("No cities available to select."),
    },
    ProviderContactsByCity {
        name: "provider-contacts-by-city",
        title: "Provider Contact by City",
        panel: Table,
        columns: &["Name", "Contact"],
        metric: None,
        empty: info("No providers found for the selected city."),
    },
    TopReceiversByClaims {
        name: "top-receivers-by-claims",
        title: "Top Receivers by Claims",
        panel: BarChart,
        columns: &["Name", "Total_Claims"],
        metric: None,
        empty: info("No claims data available to show top receivers."),
    },
    CityWithMostListings {
        name: "city-with-most-listings",
        title: "City with Most Listings",
        panel: Metric,
        columns: &["Location", "Listings"],
        metric: Some("Location"),
        empty: info("No data available."),
    },
    MostCommonFoodTypes {
        name: "most-common-food-types",
        title: "Most Common Food Types",
        panel: BarChart,
        columns: &["Food_Type", "Count"],
        metric: None,
        empty: info("No data available for food types."),
    },
    ClaimsPerFoodItem {
        name: "claims-per-food-item",
        title: "Claims per Food Item",
        panel: BarChart,
        columns: &["Food_Name", "Claims"],
        metric: None,
        empty: info("No claims data available."),
    },
    TopProviderBySuccessfulClaims {
        name: "top-provider-by-successful-claims",
        title: "Top Provider by Successful Claims",
        panel: Metric,
        columns: &["Name", "Successful_Claims"],
        metric: Some("Name"),
        empty: info("No data available."),
    },
    ClaimStatusPercentages {
        name: "claim-status-percentages",
        title: "Claims Status Percentages",
        panel: Table,
        columns: &["Status", "Percentage"],
        metric: None,
        empty: info("No claims status data available."),
    },
    AverageQuantityPerReceiver {
        name: "average-quantity-per-receiver",
        title: "Average Quantity Per Receiver",
        panel: BarChart,
        columns: &["Name", "Avg_Quantity"],
        metric: None,
        empty: info("No data available."),
    },
    MostClaimedMealType {
        name: "most-claimed-meal-type",
        title: "Most Claimed Meal Type",
        panel: Metric,
        columns: &["Meal_Type", "Claims"],
        metric: Some("Meal_Type"),
        empty: info("No data available."),
    },
    TotalDonatedByProvider {
        name: "total-donated-by-provider",
        title: "Total Donated by Provider",
        panel: BarChart,
        columns: &["Name", "Total_Donated"],
        metric: None,
        empty: info("No data available."),
    },
    TopCityByCompletedClaims {
        name: "top-city-by-completed-claims",
        title: "City with the Most Completed Claims",
        panel: Metric,
        columns: &["Location", "Completed_Claims"],
        metric: Some("Location"),
        empty: info("No data available."),
    },
    ExpiredFoodItems {
        name: "expired-food-items",
        title: "Expired Food Items",
        panel: Table,
        columns: &["Food_Name", "Expiry_Date"],
        metric: None,
        empty: success("No food items have expired! Great job!"),
    },
    ClaimsOverview {
        name: "claims-overview",
        title: "Food Claims Overview",
        panel: Table,
        columns: &["Claim_ID", "Food_Name", "Receiver", "Status", "Timestamp"],
        metric: None,
        empty: info("No claims data available."),
    },
    ListingCities {
        name: "listing-cities",
        title: "Listing Cities",
        panel: Selector,
        columns: &["Location"],
        metric: None,
        empty: info("No food listings available."),
    },
    FoodListings {
        name: "food-listings",
        title: "Available Food Listings",
        panel: Table,
        columns: FOOD_LISTING_COLUMNS,
        metric: None,
        empty: info("No food listings available."),
    },
    FoodListingById {
        name: "food-listing-by-id",
        title: "Food Listing",
        panel: Table,
        columns: FOOD_LISTING_COLUMNS,
        metric: None,
        empty: info("No food listing with that id."),
    },
}

/// Executable catalog request: a [`ReportKind`] plus bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportQuery {
    /// Count of providers.
    TotalProviders,
    /// Count of receivers.
    TotalReceivers,
    /// Sum of listed quantity; `NULL` when there are no listings.
    TotalFoodQuantity,
    /// Listed quantity per location.
    QuantityByCity,
    /// Provider and receiver head counts per provider city.
    ProvidersAndReceiversByCity,
    /// Most frequent provider type.
    TopProviderType,
    /// Distinct provider cities.
    ProviderCities,
    /// Provider names and contacts in one city.
    ProviderContactsByCity {
        /// Exact city to match.
        city: String,
    },
    /// Claim counts per receiver, descending.
    TopReceiversByClaims,
    /// Location with the most listings.
    CityWithMostListings,
    /// Listing counts per food type, descending.
    MostCommonFoodTypes,
    /// Claim counts per food name.
    ClaimsPerFoodItem,
    /// Provider with the most completed claims.
    TopProviderBySuccessfulClaims,
    /// Share of claims per status, in percent.
    ClaimStatusPercentages,
    /// Average claimed quantity per receiver.
    AverageQuantityPerReceiver,
    /// Meal type with the most claims.
    MostClaimedMealType,
    /// Listed quantity per provider.
    TotalDonatedByProvider,
    /// Location with the most completed claims.
    TopCityByCompletedClaims,
    /// Listings whose expiry date is before `today`.
    ExpiredFoodItems {
        /// Reference date for the comparison.
        today: NaiveDate,
    },
    /// Claims joined with their food and receiver names.
    ClaimsOverview,
    /// Distinct listing locations.
    ListingCities,
    /// All listings, optionally restricted to one location.
    FoodListings {
        /// Exact location to match; `None` means every listing.
        location: Option<String>,
    },
    /// One listing by id.
    FoodListingById {
        /// Listing identifier.
        food_id: FoodId,
    },
}

/// Parameters supplied when a query is requested by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// City or location filter.
    pub city: Option<String>,
    /// Listing identifier.
    pub food_id: Option<FoodId>,
    /// Reference date for expiry checks.
    pub today: Option<NaiveDate>,
}

/// A named query was requested without a parameter it needs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("query `{query}` requires the `{parameter}` parameter")]
pub struct MissingQueryParameter {
    /// Catalog name of the query.
    pub query: &'static str,
    /// Missing parameter name.
    pub parameter: &'static str,
}

impl ReportQuery {
    /// Catalog entry this request executes.
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::TotalProviders => ReportKind::TotalProviders,
            Self::TotalReceivers => ReportKind::TotalReceivers,
            Self::TotalFoodQuantity => ReportKind::TotalFoodQuantity,
            Self::QuantityByCity => ReportKind::QuantityByCity,
            Self::ProvidersAndReceiversByCity => ReportKind::ProvidersAndReceiversByCity,
            Self::TopProviderType => ReportKind::TopProviderType,
            Self::ProviderCities => ReportKind::ProviderCities,
            Self::ProviderContactsByCity { .. } => ReportKind::ProviderContactsByCity,
            Self::TopReceiversByClaims => ReportKind::TopReceiversByClaims,
            Self::CityWithMostListings => ReportKind::CityWithMostListings,
            Self::MostCommonFoodTypes => ReportKind::MostCommonFoodTypes,
            Self::ClaimsPerFoodItem => ReportKind::ClaimsPerFoodItem,
            Self::TopProviderBySuccessfulClaims => ReportKind::TopProviderBySuccessfulClaims,
            Self::ClaimStatusPercentages => ReportKind::ClaimStatusPercentages,
            Self::AverageQuantityPerReceiver => ReportKind::AverageQuantityPerReceiver,
            Self::MostClaimedMealType => ReportKind::MostClaimedMealType,
            Self::TotalDonatedByProvider => ReportKind::TotalDonatedByProvider,
            Self::TopCityByCompletedClaims => ReportKind::TopCityByCompletedClaims,
            Self::ExpiredFoodItems { .. } => ReportKind::ExpiredFoodItems,
            Self::ClaimsOverview => ReportKind::ClaimsOverview,
            Self::ListingCities => ReportKind::ListingCities,
            Self::FoodListings { .. } => ReportKind::FoodListings,
            Self::FoodListingById { .. } => ReportKind::FoodListingById,
        }
    }

    /// Bind `params` to a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`MissingQueryParameter`] when the entry needs a parameter
    /// that `params` does not carry. Extra parameters are ignored.
    pub fn bind(kind: ReportKind, params: QueryParams) -> Result<Self, MissingQueryParameter> {
        let missing = |parameter| MissingQueryParameter {
            query: kind.name(),
            parameter,
        };
        let query = match kind {
            ReportKind::TotalProviders => Self::TotalProviders,
            ReportKind::TotalReceivers => Self::TotalReceivers,
            ReportKind::TotalFoodQuantity => Self::TotalFoodQuantity,
            ReportKind::QuantityByCity => Self::QuantityByCity,
            ReportKind::ProvidersAndReceiversByCity => Self::ProvidersAndReceiversByCity,
            ReportKind::TopProviderType => Self::TopProviderType,
            ReportKind::ProviderCities => Self::ProviderCities,
            ReportKind::ProviderContactsByCity => Self::ProviderContactsByCity {
                city: params.city.ok_or_else(|| missing("city"))?,
            },
            ReportKind::TopReceiversByClaims => Self::TopReceiversByClaims,
            ReportKind::CityWithMostListings => Self::CityWithMostListings,
            ReportKind::MostCommonFoodTypes => Self::MostCommonFoodTypes,
            ReportKind::ClaimsPerFoodItem => Self::ClaimsPerFoodItem,
            ReportKind::TopProviderBySuccessfulClaims => Self::TopProviderBySuccessfulClaims,
            ReportKind::ClaimStatusPercentages => Self::ClaimStatusPercentages,
            ReportKind::AverageQuantityPerReceiver => Self::AverageQuantityPerReceiver,
            ReportKind::MostClaimedMealType => Self::MostClaimedMealType,
            ReportKind::TotalDonatedByProvider => Self::TotalDonatedByProvider,
            ReportKind::TopCityByCompletedClaims => Self::TopCityByCompletedClaims,
            ReportKind::ExpiredFoodItems => Self::ExpiredFoodItems {
                today: params.today.ok_or_else(|| missing("today"))?,
            },
            ReportKind::ClaimsOverview => Self::ClaimsOverview,
            ReportKind::ListingCities => Self::ListingCities,
            ReportKind::FoodListings => Self::FoodListings {
                location: params.city,
            },
            ReportKind::FoodListingById => Self::FoodListingById {
                food_id: params.food_id.ok_or_else(|| missing("foodId"))?,
            },
        };
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalog metadata and parameter binding.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn names_round_trip_for_every_entry() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[rstest]
    fn metric_columns_are_declared_columns() {
        for kind in ReportKind::ALL {
            if let Some(metric) = kind.metric_column() {
                assert!(kind.columns().contains(&metric), "{}", kind.name());
                assert_eq!(kind.panel(), PanelKind::Metric);
            }
        }
    }

    #[rstest]
    fn unknown_name_is_rejected() {
        assert_eq!(ReportKind::from_name("drop-table"), None);
    }

    #[rstest]
    fn expired_items_has_success_empty_state() {
        assert_eq!(
            ReportKind::ExpiredFoodItems.empty_notice().level,
            NoticeLevel::Success
        );
    }

    #[rstest]
    #[case(ReportKind::ProviderContactsByCity, "city")]
    #[case(ReportKind::ExpiredFoodItems, "today")]
    #[case(ReportKind::FoodListingById, "foodId")]
    fn bind_reports_missing_parameter(#[case] kind: ReportKind, #[case] parameter: &str) {
        let error = ReportQuery::bind(kind, QueryParams::default()).expect_err("missing param");
        assert_eq!(error.parameter, parameter);
        assert_eq!(error.query, kind.name());
    }

    #[rstest]
    fn bind_keeps_city_for_listing_filter() {
        let params = QueryParams {
            city: Some("Springfield".to_owned()),
            ..QueryParams::default()
        };
        let query = ReportQuery::bind(ReportKind::FoodListings, params).expect("bind");
        assert_eq!(
            query,
            ReportQuery::FoodListings {
                location: Some("Springfield".to_owned())
            }
        );
    }

    #[rstest]
    fn bound_queries_report_their_kind() {
        let params = QueryParams {
            city: Some("Springfield".to_owned()),
            food_id: Some(FoodId::new(3)),
            today: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        for kind in ReportKind::ALL {
            let query = ReportQuery::bind(*kind, params.clone()).expect("bind");
            assert_eq!(query.kind(), *kind);
        }
    }

    #[rstest]
    fn table_lookup_by_column_name() {
        let table = ReportTable::from_rows(
            &["Location", "Total_Quantity"],
            vec![
                vec![Cell::from("North".to_owned()), Cell::from(12_i64)],
                vec![Cell::Null, Cell::from(3_i64)],
            ],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "Total_Quantity"), Some(&Cell::Integer(12)));
        assert_eq!(table.value(1, "Location"), Some(&Cell::Null));
        assert_eq!(table.value(0, "Missing"), None);
        assert_eq!(
            table.column_values("Total_Quantity"),
            vec![&Cell::Integer(12), &Cell::Integer(3)]
        );
    }

    #[rstest]
    fn cells_serialise_as_plain_json() {
        let json = serde_json::to_value(vec![
            Cell::Null,
            Cell::Integer(4),
            Cell::Real(12.5),
            Cell::Text("x".to_owned()),
        ])
        .expect("serialise cells");
        assert_eq!(json, serde_json::json!([null, 4, 12.5, "x"]));
    }
}
