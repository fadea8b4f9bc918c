//! Catalog read service.
//!
//! Implements [`ReportsQuery`] over a [`ReportRepository`]. Each query is
//! run independently; a failing query becomes an error notice on its own
//! panel and never aborts the rest of a view.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    QueryOutcome, ReportRepository, ReportRepositoryError, ReportView, ReportsQuery,
};
use crate::domain::{Cell, Error, Notice, QueryParams, ReportKind, ReportQuery};

fn failure_notice(error: &ReportRepositoryError) -> Notice {
    match error {
        ReportRepositoryError::Connection { message } => {
            Notice::error(format!("Database connection error: {message}"))
        }
        ReportRepositoryError::Query { message } => {
            Notice::error(format!("Query execution error: {message}"))
        }
    }
}

/// Report service implementing the catalog read port.
#[derive(Clone)]
pub struct ReportService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ReportService<R> {
    /// Create the service. `clock` supplies the reference date for expiry
    /// checks.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }
}

impl<R> ReportService<R>
where
    R: ReportRepository,
{
    async fn execute(&self, query: &ReportQuery) -> QueryOutcome {
        let kind = query.kind();
        match self.repository.run(query).await {
            Ok(table) => {
                debug!(query = kind.name(), rows = table.len(), "report query completed");
                QueryOutcome::from_table(kind, table)
            }
            Err(error) => {
                warn!(query = kind.name(), %error, "report query failed");
                QueryOutcome::with_notice(kind, failure_notice(&error))
            }
        }
    }

    async fn execute_all(&self, queries: &[ReportQuery]) -> Vec<QueryOutcome> {
        let mut panels = Vec::with_capacity(queries.len());
        for query in queries {
            panels.push(self.execute(query).await);
        }
        panels
    }
}

#[async_trait]
impl<R> ReportsQuery for ReportService<R>
where
    R: ReportRepository,
{
    async fn run(&self, query: ReportQuery) -> QueryOutcome {
        self.execute(&query).await
    }

    async fn run_named(
        &self,
        kind: ReportKind,
        mut params: QueryParams,
    ) -> Result<QueryOutcome, Error> {
        params.today = params.today.or_else(|| Some(self.today()));
        let query = ReportQuery::bind(kind, params).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "parameter": err.parameter }))
        })?;
        Ok(self.execute(&query).await)
    }

    async fn dashboard(&self) -> ReportView {
        let panels = self
            .execute_all(&[
                ReportQuery::TotalProviders,
                ReportQuery::TotalReceivers,
                ReportQuery::TotalFoodQuantity,
                ReportQuery::QuantityByCity,
            ])
            .await;
        ReportView {
            view: "dashboard",
            selected_city: None,
            panels,
        }
    }

    async fn analytics(&self, city: Option<String>) -> ReportView {
        let mut panels = self
            .execute_all(&[
                ReportQuery::ProvidersAndReceiversByCity,
                ReportQuery::TopProviderType,
                ReportQuery::ProviderCities,
            ])
            .await;

        let cities = panels.last();
        let selected_city = city.or_else(|| {
            cities
                .and_then(|cities| cities.table.rows().first())
                .and_then(|row| row.first())
                .and_then(Cell::as_text)
                .map(str::to_owned)
        });
        // Without a city, the contacts panel repeats why the selector is empty.
        let selector_notice = cities
            .filter(|cities| cities.is_error())
            .and_then(|cities| cities.notice.clone())
            .unwrap_or_else(|| ReportKind::ProviderCities.empty_notice());
        let contacts = match &selected_city {
            Some(city) => {
                self.execute(&ReportQuery::ProviderContactsByCity { city: city.clone() })
                    .await
            }
            None => QueryOutcome::with_notice(ReportKind::ProviderContactsByCity, selector_notice),
        };
        panels.push(contacts);

        let today = self.today();
        panels.extend(
            self.execute_all(&[
                ReportQuery::TopReceiversByClaims,
                ReportQuery::TotalFoodQuantity,
                ReportQuery::CityWithMostListings,
                ReportQuery::MostCommonFoodTypes,
                ReportQuery::ClaimsPerFoodItem,
                ReportQuery::TopProviderBySuccessfulClaims,
                ReportQuery::ClaimStatusPercentages,
                ReportQuery::AverageQuantityPerReceiver,
                ReportQuery::MostClaimedMealType,
                ReportQuery::TotalDonatedByProvider,
                ReportQuery::TopCityByCompletedClaims,
                ReportQuery::ExpiredFoodItems { today },
            ])
            .await,
        );

        ReportView {
            view: "analytics",
            selected_city,
            panels,
        }
    }

    async fn claims(&self) -> ReportView {
        ReportView {
            view: "claims",
            selected_city: None,
            panels: vec![self.execute(&ReportQuery::ClaimsOverview).await],
        }
    }

    async fn food_listings(&self, city: Option<String>) -> ReportView {
        let panels = self
            .execute_all(&[
                ReportQuery::ListingCities,
                ReportQuery::FoodListings {
                    location: city.clone(),
                },
            ])
            .await;
        ReportView {
            view: "food-listings",
            selected_city: city,
            panels,
        }
    }
}

#[cfg(test)]
#[path = "report_service_tests.rs"]
mod tests;
