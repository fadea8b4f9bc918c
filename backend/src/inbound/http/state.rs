//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FoodListingCommand, ReportsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Catalog reads and composed views.
    pub reports: Arc<dyn ReportsQuery>,
    /// Listing add/delete.
    pub food_listings: Arc<dyn FoodListingCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(reports: Arc<dyn ReportsQuery>, food_listings: Arc<dyn FoodListingCommand>) -> Self {
        Self {
            reports,
            food_listings,
        }
    }
}
