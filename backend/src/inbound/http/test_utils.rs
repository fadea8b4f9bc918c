//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    FoodListingCommand, MockFoodListingCommand, MockReportsQuery, QueryOutcome, ReportsQuery,
};
use crate::domain::{Cell, ReportKind, ReportTable};
use crate::inbound::http::state::HttpState;

/// Build handler state from the two mocks.
pub fn state_with(reports: MockReportsQuery, food_listings: MockFoodListingCommand) -> HttpState {
    let reports: Arc<dyn ReportsQuery> = Arc::new(reports);
    let food_listings: Arc<dyn FoodListingCommand> = Arc::new(food_listings);
    HttpState::new(reports, food_listings)
}

/// Successful outcome for `kind` holding `rows`.
pub fn outcome(kind: ReportKind, rows: Vec<Vec<Cell>>) -> QueryOutcome {
    QueryOutcome::from_table(kind, ReportTable::from_rows(kind.columns(), rows))
}

/// Listing row in `FoodListings` column order.
pub fn listing_row(food_id: i32, name: &str) -> Vec<Cell> {
    vec![
        Cell::from(food_id),
        Cell::from(name.to_owned()),
        Cell::from(10),
        Cell::from("2020-01-01".to_owned()),
        Cell::from(1),
        Cell::from("Restaurant".to_owned()),
        Cell::from("City1".to_owned()),
        Cell::from("Vegetarian".to_owned()),
        Cell::from("Breakfast".to_owned()),
    ]
}

/// Initialise an Actix test service exposing `/api/v1` over `state`.
macro_rules! init_api {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(crate::middleware::Trace)
                .service(
                    actix_web::web::scope("/api/v1")
                        .configure(crate::inbound::http::configure_api),
                ),
        )
    };
}

pub(crate) use init_api;
