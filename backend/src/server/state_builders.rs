//! Builders for HTTP state ports.

use std::sync::Arc;

use mockable::DefaultClock;

use foodshare::domain::ports::{
    FoodListingCommand, ReportsQuery, UnavailableFoodListingRepository,
    UnavailableReportRepository,
};
use foodshare::domain::{FoodListingService, ReportService};
use foodshare::inbound::http::state::HttpState;
use foodshare::outbound::persistence::{DieselFoodListingRepository, DieselReportRepository};

use super::StoreState;

/// Wire services over Diesel repositories when the store is open, or over
/// the unavailable stand-ins otherwise.
pub(crate) fn build_http_state(store: &StoreState) -> HttpState {
    let (reports, food_listings): (Arc<dyn ReportsQuery>, Arc<dyn FoodListingCommand>) =
        match store {
            StoreState::Ready(pool) => (
                Arc::new(ReportService::new(
                    Arc::new(DieselReportRepository::new(pool.clone())),
                    Arc::new(DefaultClock),
                )),
                Arc::new(FoodListingService::new(Arc::new(
                    DieselFoodListingRepository::new(pool.clone()),
                ))),
            ),
            StoreState::Unavailable(message) => (
                Arc::new(ReportService::new(
                    Arc::new(UnavailableReportRepository::new(message.clone())),
                    Arc::new(DefaultClock),
                )),
                Arc::new(FoodListingService::new(Arc::new(
                    UnavailableFoodListingRepository::new(message.clone()),
                ))),
            ),
        };
    HttpState::new(reports, food_listings)
}
