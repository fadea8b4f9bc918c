//! HTTP inbound adapter exposing the report views, the query catalog and
//! listing mutations.

pub mod cache_control;
pub mod error;
pub mod food_listings;
pub mod health;
pub mod queries;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub(crate) mod validation;
pub mod views;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` route on `cfg`.
///
/// Body and query-string extraction failures answer with the same error
/// envelope as handler validation.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use foodshare::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| validation::malformed_body(&err).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| validation::malformed_query_string(&err).into());

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(views::dashboard)
        .service(views::analytics)
        .service(views::claims)
        .service(views::food_listings)
        .service(queries::run_query)
        .service(food_listings::get_food_listing)
        .service(food_listings::add_food_listing)
        .service(food_listings::delete_food_listing);
}
