use actix_web::{
    http::{header::CONTENT_SECURITY_POLICY, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use log::debug;
use salesmap_engine::{
    db_types::Role,
    traits::MapQueryError,
    MapApi,
    MapLocation,
};
use serde_json::json;

use super::helpers::{get_auth_config, get_request, issue_token};
use crate::{
    endpoint_tests::mocks::MockMapReader,
    middleware::JwtMiddlewareFactory,
    routes::{map_page_resource, MapDataRoute},
};

const DATA_PATH: &str = "/events/democon/sales-map/data";

#[actix_web::test]
async fn fetch_map_data_no_token() {
    let _ = env_logger::try_init().ok();
    let err = get_request("", DATA_PATH, configure).await.expect_err("Expected error");
    assert_eq!(err, "Authentication Error. No access token was provided.");
}

#[actix_web::test]
async fn fetch_map_data_invalid_sig() {
    let _ = env_logger::try_init().ok();
    let mut token = issue_token(vec![Role::ViewOrders]);
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    debug!("Calling {DATA_PATH} with invalid token {token}");
    let err = get_request(&token, DATA_PATH, configure).await.expect_err("Expected error");
    assert!(err.starts_with("Authentication Error."), "unexpected error: {err}");
}

#[actix_web::test]
async fn fetch_map_data_without_view_orders_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(vec![]);
    let err = get_request(&token, DATA_PATH, configure).await.expect_err("Request should have failed");
    assert_eq!(err, "Insufficient permissions");
}

#[actix_web::test]
async fn fetch_map_data() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(vec![Role::ViewOrders]);
    let (status, body) = get_request(&token, DATA_PATH, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let data: serde_json::Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(
        data,
        json!({"locations": [
            {"lat": 40.7, "lon": -73.9, "tooltip": "Order: O1"},
            {"lat": 48.85, "lon": 2.35, "tooltip": "Order: O2"}
        ]})
    );
}

#[actix_web::test]
async fn fetch_map_data_storage_error() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(vec![Role::ViewOrders]);
    let err = get_request(&token, DATA_PATH, configure_failing).await.expect_err("Expected error");
    assert_eq!(err, "An error occurred on the backend of the server. Database error: disk I/O error");
}

#[actix_web::test]
async fn map_page_renders_with_csp_header() {
    let _ = env_logger::try_init().ok();
    let app = App::new()
        .wrap(JwtMiddlewareFactory::new(get_auth_config()))
        .service(map_page_resource("https://*.tile.openstreetmap.org"));
    let service = test::init_service(app).await;
    let token = issue_token(vec![Role::ViewOrders]);
    let req = TestRequest::get()
        .uri("/events/democon/sales-map")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let csp = res
        .headers()
        .get(CONTENT_SECURITY_POLICY)
        .expect("No CSP header on map page response")
        .to_str()
        .unwrap()
        .to_string();
    assert!(csp.contains("img-src https://*.tile.openstreetmap.org"), "CSP header was: {csp}");
    assert!(csp.contains("style-src 'unsafe-inline'"), "CSP header was: {csp}");
    let body = String::from_utf8(test::read_body(res).await.to_vec()).unwrap();
    assert!(body.contains("sales-map-container"));
    assert!(body.contains("/api/events/democon/sales-map/data"));
}

#[actix_web::test]
async fn map_page_without_view_orders_role() {
    let _ = env_logger::try_init().ok();
    let app = App::new()
        .wrap(JwtMiddlewareFactory::new(get_auth_config()))
        .service(map_page_resource("https://*.tile.openstreetmap.org"));
    let service = test::init_service(app).await;
    let token = issue_token(vec![]);
    let req = TestRequest::get()
        .uri("/events/democon/sales-map")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let err = test::try_call_service(&service, req).await.expect_err("Request should have failed");
    assert_eq!(err.to_string(), "Insufficient permissions");
}

fn configure(cfg: &mut ServiceConfig) {
    let mut map_reader = MockMapReader::new();
    map_reader.expect_fetch_locations_for_event().returning(|_| Ok(locations_response()));
    let map_api = MapApi::new(map_reader);
    cfg.service(MapDataRoute::<MockMapReader>::new()).app_data(web::Data::new(map_api));
}

fn configure_failing(cfg: &mut ServiceConfig) {
    let mut map_reader = MockMapReader::new();
    map_reader
        .expect_fetch_locations_for_event()
        .returning(|_| Err(MapQueryError::DatabaseError("disk I/O error".to_string())));
    let map_api = MapApi::new(map_reader);
    cfg.service(MapDataRoute::<MockMapReader>::new()).app_data(web::Data::new(map_api));
}

// Mock response to `fetch_locations_for_event` call
fn locations_response() -> Vec<MapLocation> {
    vec![
        MapLocation { lat: 40.7, lon: -73.9, tooltip: "Order: O1".to_string() },
        MapLocation { lat: 48.85, lon: 2.35, tooltip: "Order: O2".to_string() },
    ]
}
