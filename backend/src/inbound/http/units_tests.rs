//! Tests for unit catalogue HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::TestBackend;
use crate::inbound::http::test_utils::test_app;

fn sample_unit_payload() -> Value {
    json!({
        "numberOfRooms": 3,
        "accommodationType": "APARTMENT",
        "floor": 7,
        "baseCost": "100.00",
        "description": "Corner apartment"
    })
}

#[actix_web::test]
async fn create_unit_quotes_marked_up_cost() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/units")
        .set_json(sample_unit_payload())
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["totalCost"], "110.00");
    assert_eq!(body["accommodationType"], "APARTMENT");
    assert!(body.get("id").and_then(Value::as_str).is_some());
}

#[actix_web::test]
async fn create_unit_rejects_negative_base_cost() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;

    let mut payload = sample_unit_payload();
    payload["baseCost"] = Value::String("-1.00".to_owned());

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/units")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn get_unit_rejects_malformed_id() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/units/not-a-uuid")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "unitId");
}

#[actix_web::test]
async fn get_unit_reports_missing_unit() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/units/00000000-0000-0000-0000-000000000001")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_excludes_units_booked_for_overlapping_dates() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;
    let user_id = backend.seed_user().await.expect("user seeded");
    let booked = backend.seed_unit(dec!(100.00)).await.expect("unit seeded");
    let free = backend.seed_unit(dec!(100.00)).await.expect("unit seeded");

    let booking_request = actix_test::TestRequest::post()
        .uri("/api/v1/bookings")
        .set_json(json!({
            "unitId": booked.to_string(),
            "userId": user_id.to_string(),
            "checkInDate": "2030-09-10",
            "checkOutDate": "2030-09-15"
        }))
        .to_request();
    let booking_response = actix_test::call_service(&app, booking_request).await;
    assert_eq!(booking_response.status(), StatusCode::CREATED);

    let search_request = actix_test::TestRequest::get()
        .uri("/api/v1/units/search?checkInDate=2030-09-12&checkOutDate=2030-09-14")
        .to_request();
    let search_response = actix_test::call_service(&app, search_request).await;

    assert_eq!(search_response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(search_response).await;
    let free_id = free.to_string();
    let ids: Vec<&str> = body["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec![free_id.as_str()]);
}

#[actix_web::test]
async fn search_rejects_inverted_cost_bounds() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;

    let request = actix_test::TestRequest::get()
        .uri(
            "/api/v1/units/search?minCost=200.00&maxCost=100.00\
             &checkInDate=2030-09-12&checkOutDate=2030-09-14",
        )
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn search_pages_through_matches() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(&backend)).await;
    for _ in 0..3 {
        backend.seed_unit(dec!(80.00)).await.expect("unit seeded");
    }

    let request = actix_test::TestRequest::get()
        .uri(
            "/api/v1/units/search?checkInDate=2030-09-12&checkOutDate=2030-09-14\
             &offset=1&limit=1",
        )
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["items"].as_array().expect("items array").len(), 1);
    assert_eq!(body["offset"], 1);
    assert_eq!(body["limit"], 1);
}
