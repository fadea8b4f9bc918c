//! Handler tests for the food listing endpoints.

use actix_web::http::StatusCode;
use actix_web::test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockFoodListingCommand, MockReportsQuery, QueryOutcome};
use crate::domain::{Error, FoodId, FoodListingDraft, Notice, ReportKind, ReportQuery};
use crate::inbound::http::test_utils::{init_api, listing_row, outcome, state_with};
use crate::middleware::TRACE_ID_HEADER;

fn reports_returning(result: QueryOutcome) -> MockReportsQuery {
    let mut reports = MockReportsQuery::new();
    reports
        .expect_run()
        .with(eq(ReportQuery::FoodListingById {
            food_id: FoodId::new(1),
        }))
        .times(1)
        .return_once(move |_| result);
    reports
}

#[rstest]
#[actix_web::test]
async fn get_returns_the_listing() {
    let reports = reports_returning(outcome(
        ReportKind::FoodListingById,
        vec![listing_row(1, "Bread")],
    ));
    let app = init_api!(state_with(reports, MockFoodListingCommand::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/food-listings/1")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["query"], "food-listing-by-id");
    assert_eq!(body["table"]["rows"][0][1], "Bread");
}

#[rstest]
#[actix_web::test]
async fn get_missing_listing_is_not_found() {
    let reports = reports_returning(outcome(ReportKind::FoodListingById, Vec::new()));
    let app = init_api!(state_with(reports, MockFoodListingCommand::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/food-listings/1")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[actix_web::test]
async fn get_during_outage_is_unavailable() {
    let reports = reports_returning(QueryOutcome::with_notice(
        ReportKind::FoodListingById,
        Notice::error("Database connection error: unable to open database file"),
    ));
    let app = init_api!(state_with(reports, MockFoodListingCommand::new())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/food-listings/1")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[case::get(test::TestRequest::get())]
#[case::delete(test::TestRequest::delete())]
#[actix_web::test]
async fn non_integer_ids_are_rejected(#[case] request: test::TestRequest) {
    let app = init_api!(state_with(
        MockReportsQuery::new(),
        MockFoodListingCommand::new()
    ))
    .await;

    let req = request.uri("/api/v1/food-listings/bread").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "id");
}

fn bread_payload() -> Value {
    json!({
        "foodName": "Bread",
        "quantity": 10,
        "expiryDate": "2020-01-01",
        "providerId": 1,
        "providerType": "Restaurant",
        "location": "City1",
        "foodType": "Vegetarian",
        "mealType": "Breakfast",
    })
}

#[rstest]
#[actix_web::test]
async fn post_creates_listing() {
    let mut commands = MockFoodListingCommand::new();
    commands
        .expect_add()
        .withf(|draft: &FoodListingDraft| {
            draft.food_name.as_deref() == Some("Bread") && draft.food_id.is_none()
        })
        .times(1)
        .return_once(|_| Ok(FoodId::new(5)));
    let app = init_api!(state_with(MockReportsQuery::new(), commands)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/food-listings")
        .set_json(bread_payload())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "foodId": 5 }));
}

#[rstest]
#[case(Error::invalid_request("Quantity must not be negative"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("food listing 1 already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn post_maps_command_failures(#[case] error: Error, #[case] expected: StatusCode) {
    let mut commands = MockFoodListingCommand::new();
    commands.expect_add().return_once(move |_| Err(error));
    let app = init_api!(state_with(MockReportsQuery::new(), commands)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/food-listings")
        .set_json(bread_payload())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn delete_answers_no_content() {
    let mut commands = MockFoodListingCommand::new();
    commands
        .expect_delete()
        .with(eq(FoodId::new(3)))
        .times(1)
        .return_once(|_| Ok(()));
    let app = init_api!(state_with(MockReportsQuery::new(), commands)).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/food-listings/3")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[actix_web::test]
async fn delete_missing_listing_is_not_found() {
    let mut commands = MockFoodListingCommand::new();
    commands
        .expect_delete()
        .return_once(|id| Err(Error::not_found(format!("food listing {id} not found"))));
    let app = init_api!(state_with(MockReportsQuery::new(), commands)).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/food-listings/99")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "food listing 99 not found");
}
