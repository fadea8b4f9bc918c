//! Composed report views.
//!
//! ```text
//! GET /api/v1/views/dashboard
//! GET /api/v1/views/analytics?city=
//! GET /api/v1/views/claims
//! GET /api/v1/views/food-listings?city=
//! ```
//!
//! Views always answer 200; failing panels carry an error notice.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::ports::ReportView;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;

/// Optional city selector shared by the city-scoped views.
#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    city: Option<String>,
}

impl CityQuery {
    /// Selected city; blank values count as absent.
    pub fn city(&self) -> Option<String> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_owned)
    }
}

fn view_response(view: &ReportView) -> HttpResponse {
    HttpResponse::Ok().insert_header(no_store_header()).json(view)
}

/// Headline totals and quantity by city.
#[get("/views/dashboard")]
pub async fn dashboard(state: web::Data<HttpState>) -> HttpResponse {
    view_response(&state.reports.dashboard().await)
}

/// Every analytical panel.
#[get("/views/analytics")]
pub async fn analytics(state: web::Data<HttpState>, query: web::Query<CityQuery>) -> HttpResponse {
    view_response(&state.reports.analytics(query.city()).await)
}

/// Claims overview.
#[get("/views/claims")]
pub async fn claims(state: web::Data<HttpState>) -> HttpResponse {
    view_response(&state.reports.claims().await)
}

/// Listings, optionally for one location.
#[get("/views/food-listings")]
pub async fn food_listings(
    state: web::Data<HttpState>,
    query: web::Query<CityQuery>,
) -> HttpResponse {
    view_response(&state.reports.food_listings(query.city()).await)
}
