//! Integration tests for the query catalog against a seeded SQLite store.

use std::sync::Arc;

use chrono::Duration;
use foodshare::domain::ports::{
    FoodListingCommand, ReportRepository, ReportsQuery, UnavailableReportRepository,
};
use foodshare::domain::{
    Cell, FoodListingDraft, FoodListingService, NoticeLevel, QueryParams, ReportKind,
    ReportQuery, ReportService,
};
use foodshare::outbound::persistence::{DieselFoodListingRepository, DieselReportRepository};
use rstest::rstest;

mod support;

use support::{empty_store, fixture_clock, fixture_today, mixed_store, seeded_store};

fn text(value: &str) -> Cell {
    Cell::Text(value.to_owned())
}

fn int(value: i64) -> Cell {
    Cell::Integer(value)
}

fn row(cells: &[Cell]) -> Vec<Cell> {
    cells.to_vec()
}

/// Whether a query promises a row order.
#[derive(Debug, Clone, Copy)]
enum Order {
    Ranked,
    Unordered,
}

fn sorted(mut rows: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    rows.sort_by_key(|cells| format!("{cells:?}"));
    rows
}

#[rstest]
#[tokio::test]
async fn bread_seed_totals_and_expiry() {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let total = repository
        .run(&ReportQuery::TotalFoodQuantity)
        .await
        .expect("total quantity");
    let expired = repository
        .run(&ReportQuery::ExpiredFoodItems {
            today: fixture_today(),
        })
        .await
        .expect("expired items");

    assert_eq!(total.value(0, "Total_Quantity"), Some(&Cell::Integer(10)));
    assert_eq!(expired.rows(), [vec![text("Bread"), text("2020-01-01")]]);
}

#[rstest]
#[tokio::test]
async fn claim_status_percentages_sum_to_one_hundred() {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let table = repository
        .run(&ReportQuery::ClaimStatusPercentages)
        .await
        .expect("percentages");
    let sum: f64 = table
        .column_values("Percentage")
        .into_iter()
        .filter_map(Cell::as_real)
        .sum();

    assert_eq!(table.len(), 3);
    assert!((sum - 100.0).abs() <= 0.03, "sum was {sum}");
}

#[rstest]
#[tokio::test]
async fn yesterday_is_expired_and_tomorrow_is_not() {
    let seeded = empty_store().await;
    let commands = FoodListingService::new(Arc::new(DieselFoodListingRepository::new(
        seeded.pool.clone(),
    )));
    let today = fixture_today();
    for (name, expiry) in [
        ("Soup", today - Duration::days(1)),
        ("Salad", today + Duration::days(1)),
        ("Rice", today),
    ] {
        commands
            .add(FoodListingDraft {
                food_name: Some(name.to_owned()),
                quantity: Some(1),
                expiry_date: Some(expiry.format("%Y-%m-%d").to_string()),
                provider_id: Some(1),
                provider_type: Some("Restaurant".to_owned()),
                location: Some("City1".to_owned()),
                food_type: Some("Vegan".to_owned()),
                meal_type: Some("Lunch".to_owned()),
                ..FoodListingDraft::default()
            })
            .await
            .expect("add listing");
    }

    let expired = DieselReportRepository::new(seeded.pool.clone())
        .run(&ReportQuery::ExpiredFoodItems { today })
        .await
        .expect("expired items");

    let names: Vec<_> = expired.column_values("Food_Name");
    assert_eq!(names, vec![&text("Soup")]);
}

#[rstest]
#[case(Some("City1"), 1)]
#[case(Some("Nowhere"), 0)]
#[case(None, 1)]
#[tokio::test]
async fn food_listings_filter_by_location(#[case] location: Option<&str>, #[case] rows: usize) {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let table = repository
        .run(&ReportQuery::FoodListings {
            location: location.map(str::to_owned),
        })
        .await
        .expect("listings");

    assert_eq!(table.len(), rows);
}

#[rstest]
#[tokio::test]
async fn provider_contacts_use_the_bound_city() {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let contacts = repository
        .run(&ReportQuery::ProviderContactsByCity {
            city: "City1".to_owned(),
        })
        .await
        .expect("contacts");
    let injected = repository
        .run(&ReportQuery::ProviderContactsByCity {
            city: "City1' OR '1'='1".to_owned(),
        })
        .await
        .expect("contacts");

    assert_eq!(contacts.rows(), [vec![text("A"), text("c1")]]);
    assert!(injected.is_empty());
}

#[rstest]
#[tokio::test]
async fn claims_overview_joins_names() {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let overview = repository
        .run(&ReportQuery::ClaimsOverview)
        .await
        .expect("overview");

    assert_eq!(overview.len(), 3);
    assert_eq!(overview.value(0, "Food_Name"), Some(&text("Bread")));
    assert_eq!(overview.value(2, "Timestamp"), Some(&text("2025-03-07 11:30:00")));
}

#[rstest]
#[tokio::test]
async fn every_catalog_query_runs_with_its_columns() {
    let seeded = seeded_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    for kind in ReportKind::ALL.iter().copied() {
        let query = ReportQuery::bind(
            kind,
            QueryParams {
                city: Some("City1".to_owned()),
                food_id: Some(foodshare::domain::FoodId::new(1)),
                today: Some(fixture_today()),
            },
        )
        .expect("bind parameters");

        let table = repository.run(&query).await.expect("query runs");

        assert_eq!(table.columns().len(), kind.columns().len(), "{}", kind.name());
    }
}

#[rstest]
#[tokio::test]
async fn analytics_view_defaults_to_first_provider_city() {
    let seeded = seeded_store().await;
    let service = ReportService::new(
        Arc::new(DieselReportRepository::new(seeded.pool.clone())),
        fixture_clock(),
    );

    let view = service.analytics(None).await;

    assert_eq!(view.selected_city.as_deref(), Some("City1"));
    assert!(view.panels.iter().all(|panel| !panel.is_error()));
    let top_receiver = view
        .panel(ReportKind::TopReceiversByClaims)
        .and_then(|panel| panel.table.value(0, "Name").cloned());
    assert_eq!(top_receiver, Some(text("Charity Two")));
}

#[rstest]
#[tokio::test]
async fn degraded_store_yields_notices_for_every_panel() {
    let service = ReportService::new(
        Arc::new(UnavailableReportRepository::new("unable to open database file")),
        fixture_clock(),
    );

    let view = service.dashboard().await;

    assert_eq!(view.panels.len(), 4);
    for panel in &view.panels {
        let notice = panel.notice.as_ref().expect("notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Database connection error:"));
        assert!(panel.table.is_empty());
    }
}

#[rstest]
#[case::quantity_by_city(
    ReportQuery::QuantityByCity,
    vec![row(&[text("C1"), int(15)]), row(&[text("C2"), int(4)])],
    Order::Unordered
)]
#[case::providers_and_receivers_by_city(
    ReportQuery::ProvidersAndReceiversByCity,
    vec![row(&[text("C1"), int(2), int(2)]), row(&[text("C2"), int(1), int(0)])],
    Order::Unordered
)]
#[case::top_provider_type(
    ReportQuery::TopProviderType,
    vec![row(&[text("Grocery"), int(2)])],
    Order::Ranked
)]
#[case::top_receivers_by_claims(
    ReportQuery::TopReceiversByClaims,
    vec![
        row(&[text("R1"), int(3)]),
        row(&[text("R2"), int(2)]),
        row(&[text("R3"), int(1)]),
    ],
    Order::Ranked
)]
#[case::city_with_most_listings(
    ReportQuery::CityWithMostListings,
    vec![row(&[text("C1"), int(2)])],
    Order::Ranked
)]
#[case::most_common_food_types(
    ReportQuery::MostCommonFoodTypes,
    vec![row(&[text("Vegetarian"), int(2)]), row(&[text("Vegan"), int(1)])],
    Order::Ranked
)]
#[case::claims_per_food_item(
    ReportQuery::ClaimsPerFoodItem,
    vec![
        row(&[text("Apples"), int(1)]),
        row(&[text("Bread"), int(2)]),
        row(&[text("Curry"), int(3)]),
    ],
    Order::Unordered
)]
#[case::top_provider_counts_completed_claims_only(
    ReportQuery::TopProviderBySuccessfulClaims,
    vec![row(&[text("P3"), int(2)])],
    Order::Ranked
)]
#[case::claim_status_percentages(
    ReportQuery::ClaimStatusPercentages,
    vec![
        row(&[text("Cancelled"), Cell::Real(33.33)]),
        row(&[text("Completed"), Cell::Real(50.0)]),
        row(&[text("Pending"), Cell::Real(16.67)]),
    ],
    Order::Unordered
)]
#[case::average_quantity_rounds_to_two_places(
    ReportQuery::AverageQuantityPerReceiver,
    vec![
        row(&[text("R1"), Cell::Real(8.33)]),
        row(&[text("R2"), Cell::Real(4.0)]),
        row(&[text("R3"), Cell::Real(4.0)]),
    ],
    Order::Unordered
)]
#[case::most_claimed_meal_type(
    ReportQuery::MostClaimedMealType,
    vec![row(&[text("Dinner"), int(5)])],
    Order::Ranked
)]
#[case::total_donated_by_provider(
    ReportQuery::TotalDonatedByProvider,
    vec![
        row(&[text("P1"), int(5)]),
        row(&[text("P2"), int(10)]),
        row(&[text("P3"), int(4)]),
    ],
    Order::Unordered
)]
#[case::top_city_by_completed_claims(
    ReportQuery::TopCityByCompletedClaims,
    vec![row(&[text("C2"), int(2)])],
    Order::Ranked
)]
#[case::expired_food_items(
    ReportQuery::ExpiredFoodItems { today: fixture_today() },
    vec![row(&[text("Bread"), text("2025-03-10")])],
    Order::Ranked
)]
#[tokio::test]
async fn aggregates_over_mixed_seed(
    #[case] query: ReportQuery,
    #[case] expected: Vec<Vec<Cell>>,
    #[case] order: Order,
) {
    let seeded = mixed_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    let table = repository.run(&query).await.expect("query runs");

    let rows = table.rows().to_vec();
    match order {
        Order::Ranked => assert_eq!(rows, expected, "{}", query.kind().name()),
        Order::Unordered => assert_eq!(
            sorted(rows),
            sorted(expected),
            "{}",
            query.kind().name()
        ),
    }
}

#[rstest]
#[tokio::test]
async fn mixed_seed_totals() {
    let seeded = mixed_store().await;
    let repository = DieselReportRepository::new(seeded.pool.clone());

    for (query, column, expected) in [
        (ReportQuery::TotalProviders, "Total", 3),
        (ReportQuery::TotalReceivers, "Total", 3),
        (ReportQuery::TotalFoodQuantity, "Total_Quantity", 19),
    ] {
        let table = repository.run(&query).await.expect("total");
        assert_eq!(table.value(0, column), Some(&int(expected)));
    }
}
