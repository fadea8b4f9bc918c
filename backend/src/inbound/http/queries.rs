//! Single catalog query endpoint.
//!
//! ```text
//! GET /api/v1/queries/{name}?city=&foodId=&today=
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::QueryParams;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_food_id, parse_optional_date, parse_report_kind,
};

/// Raw query-string parameters before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParamsRequest {
    city: Option<String>,
    food_id: Option<String>,
    today: Option<String>,
}

impl QueryParamsRequest {
    fn into_params(self) -> ApiResult<QueryParams> {
        let city = self
            .city
            .map(|city| city.trim().to_owned())
            .filter(|city| !city.is_empty());
        let food_id = self
            .food_id
            .as_deref()
            .map(|raw| parse_food_id(raw, FieldName::new("foodId")))
            .transpose()?;
        let today = parse_optional_date(self.today.as_deref(), FieldName::new("today"))?;
        Ok(QueryParams {
            city,
            food_id,
            today,
        })
    }
}

/// Run one catalog query by name.
///
/// Unknown names answer 404 and missing parameters 400. Store failures are
/// reported in the outcome's notice with a 200 status, as on the views.
#[get("/queries/{name}")]
pub async fn run_query(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<QueryParamsRequest>,
) -> ApiResult<HttpResponse> {
    let kind = parse_report_kind(&path.into_inner())?;
    let params = query.into_inner().into_params()?;
    let outcome = state.reports.run_named(kind, params).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(outcome))
}
