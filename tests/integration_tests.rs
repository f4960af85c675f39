// Integration tests for AIKYA Nearby

use actix_web::{http::StatusCode, test as actix_test, web, App};
use aikya_nearby::core::{CenterQuery, MealFinder};
use aikya_nearby::models::{CenterCategory, Coordinate};
use aikya_nearby::routes::{self, AppState};
use aikya_nearby::services::{CenterCatalog, IpGeoLocator, PositionPolicy, SubmissionQueue};
use serde_json::{json, Value};
use std::sync::Arc;

const CATALOG_PATH: &str = "data/meal_centers.toml";

fn delhi() -> Coordinate {
    Coordinate::new(28.6139, 77.2090).unwrap()
}

fn create_state() -> AppState {
    create_state_with_queue(SubmissionQueue::default())
}

fn create_state_with_queue(submissions: SubmissionQueue) -> AppState {
    AppState {
        catalog: Arc::new(CenterCatalog::load(CATALOG_PATH).unwrap()),
        submissions: Arc::new(submissions),
        locator: Arc::new(IpGeoLocator::disabled().unwrap()),
        finder: MealFinder::default(),
        position_policy: PositionPolicy::default(),
        share_page_url: "https://aikya.org/nearby-free-meal".to_string(),
    }
}

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
                .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
                .configure(routes::configure_routes),
        )
        .await
    };
}

fn ids(body: &Value) -> Vec<u64> {
    body["centers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = CenterCatalog::load(CATALOG_PATH).unwrap();
    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.categories().len(), CenterCategory::ALL.len());
}

#[test]
fn test_end_to_end_search_over_catalog() {
    let catalog = CenterCatalog::load(CATALOG_PATH).unwrap();
    let finder = MealFinder::default();

    let query = CenterQuery { radius_km: Some(5.0), ..Default::default() };
    let result = finder.find_nearby(delhi(), catalog.all(), &query).unwrap();

    // Inactive center 10 ties with 7 at 4.6 km and keeps its catalog position
    let found: Vec<u32> = result.centers.iter().map(|n| n.record.id).collect();
    assert_eq!(found, vec![6, 1, 4, 7, 10, 5]);
    assert!(!result.centers[4].record.is_active);

    let query = CenterQuery { radius_km: Some(100.0), ..Default::default() };
    let result = finder.find_nearby(delhi(), catalog.all(), &query).unwrap();
    assert_eq!(result.centers.len(), 12);

    let query = CenterQuery { radius_km: Some(100.0), active_only: true, ..Default::default() };
    let result = finder.find_nearby(delhi(), catalog.all(), &query).unwrap();
    assert_eq!(result.centers.len(), 11);
    assert!(result.centers.iter().all(|n| n.record.id != 10));
}

#[test]
fn test_boundary_radius_over_catalog() {
    let catalog = CenterCatalog::load(CATALOG_PATH).unwrap();
    let finder = MealFinder::default();
    let query = |radius| CenterQuery {
        category: Some(CenterCategory::Gurudwara),
        radius_km: Some(radius),
        ..Default::default()
    };

    // Gurudwara Sis Ganj Sahib sits 5.2 km from the origin
    let result = finder.find_nearby(delhi(), catalog.all(), &query(5.2)).unwrap();
    assert!(result.centers.iter().any(|n| n.record.id == 2));

    let result = finder.find_nearby(delhi(), catalog.all(), &query(5.1)).unwrap();
    assert!(result.centers.iter().all(|n| n.record.id != 2));
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog_size"], 12);
}

#[actix_web::test]
async fn test_nearby_with_explicit_origin() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?lat=28.6139&lng=77.2090&radiusKm=5")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["originSource"], "client");
    assert_eq!(body["radiusKm"], 5.0);
    assert_eq!(ids(&body), vec![6, 1, 4, 7, 10, 5]);
    assert_eq!(body["totalResults"], 6);
    assert_eq!(body["centers"][0]["distanceKm"], 0.9);
    assert_eq!(body["centers"][0]["type"], "Church");
    assert!(body["centers"][0]["directionsUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://www.google.com/maps/dir/?api=1&destination=28.6219,77.2085"));
}

#[actix_web::test]
async fn test_nearby_uses_fallback_without_origin() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?type=Gurudwara")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["originSource"], "fallback");
    assert_eq!(body["origin"]["latitude"], 28.6139);
    assert_eq!(body["radiusKm"], 30.0);
    assert_eq!(ids(&body), vec![1, 10, 2, 12]);
    assert_eq!(body["centers"][1]["isActive"], false);
}

#[actix_web::test]
async fn test_nearby_active_only_flag() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?type=Gurudwara&activeOnly=true")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![1, 2, 12]);
    assert_eq!(body["totalCandidates"], 3);
}

#[actix_web::test]
async fn test_nearby_search_term() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?lat=28.6139&lng=77.2090&search=KITCHEN&type=all")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![7, 9, 11]);
}

#[actix_web::test]
async fn test_nearby_limit() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?lat=28.6139&lng=77.2090&limit=2")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(ids(&body), vec![6, 1]);
    assert_eq!(body["totalCandidates"], 12);
}

#[actix_web::test]
async fn test_nearby_rejects_bad_input() {
    let app = init_app!(create_state());

    for uri in [
        "/api/v1/meal-centers?lat=123&lng=77.2",
        "/api/v1/meal-centers?lat=28.6",
        "/api/v1/meal-centers?lat=28.6&lng=77.2&radiusKm=0",
        "/api/v1/meal-centers?lat=28.6&lng=77.2&radiusKm=-5",
        "/api/v1/meal-centers?type=Library",
        "/api/v1/meal-centers?lat=north&lng=77.2",
    ] {
        let req = actix_test::TestRequest::get().uri(uri).to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status_code"], 400, "{}", uri);
    }
}

#[actix_web::test]
async fn test_nearby_empty_result() {
    let app = init_app!(create_state());

    // Mumbai: nothing in the catalog within 100 km
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/meal-centers?lat=19.0760&lng=72.8777&radiusKm=100")
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["totalResults"], 0);
    assert!(body["centers"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_center_detail() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/1").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["name"], "Gurudwara Bangla Sahib Langar");
    assert_eq!(body["capacity"], 10000);
    assert!(body["shareLinks"]["whatsapp"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/?text=Check%20out%20this%20free%20meal%20center"));

    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/999").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_categories_endpoint() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/categories").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 8);
    assert_eq!(categories[0], "Gurudwara");
}

#[actix_web::test]
async fn test_location_endpoint_falls_back() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::get().uri("/api/v1/location").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["source"], "fallback");
    assert_eq!(body["position"]["longitude"], 77.2090);
}

#[actix_web::test]
async fn test_submit_and_list_submissions() {
    let app = init_app!(create_state());

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/meal-centers/submissions")
        .set_json(json!({
            "name": "Sewa Rasoi Lajpat Nagar",
            "type": "Community Kitchen",
            "address": "Lajpat Nagar II, New Delhi",
            "timings": "1:00 PM - 3:00 PM"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["submission"]["capacity"], 100);
    assert_eq!(body["submission"]["positionSource"], "fallback");
    assert_eq!(body["submission"]["coordinate"]["latitude"], 28.6139);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/meal-centers/submissions")
        .set_json(json!({
            "name": "Roti Ghar",
            "type": "NGO",
            "address": "Rohini, Delhi",
            "lat": 28.7041,
            "lng": 77.1025,
            "timings": "Evenings",
            "capacity": 50
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/submissions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["submissions"][1]["positionSource"], "client");
    assert_eq!(body["submissions"][1]["capacity"], 50);
}

#[actix_web::test]
async fn test_submit_rejects_invalid_body() {
    let app = init_app!(create_state());

    // Empty name fails validation
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/meal-centers/submissions")
        .set_json(json!({
            "name": "",
            "type": "NGO",
            "address": "Rohini, Delhi",
            "timings": "Evenings"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Whitespace-only text is trimmed to empty and rejected
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/meal-centers/submissions")
        .set_json(json!({
            "name": "   ",
            "type": "NGO",
            "address": "  ",
            "timings": " "
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");

    // Unknown type fails deserialization
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/meal-centers/submissions")
        .set_json(json!({
            "name": "Somewhere",
            "type": "Library",
            "address": "Rohini, Delhi",
            "timings": "Evenings"
        }))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");

    // Nothing was queued
    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/submissions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
}

#[actix_web::test]
async fn test_full_submission_queue_returns_503() {
    let app = init_app!(create_state_with_queue(SubmissionQueue::new(2)));
    let submission = json!({
        "name": "Roti Ghar",
        "type": "NGO",
        "address": "Rohini, Delhi",
        "timings": "Evenings"
    });

    for _ in 0..2 {
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/meal-centers/submissions")
            .set_json(&submission)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
    }

    for _ in 0..5 {
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/meal-centers/submissions")
            .set_json(&submission)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["error"], "Submissions paused");
        assert_eq!(body["status_code"], 503);
    }

    let req = actix_test::TestRequest::get().uri("/api/v1/meal-centers/submissions").to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 2);
}
