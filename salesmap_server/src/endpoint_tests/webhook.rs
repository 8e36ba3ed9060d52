use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use salesmap_engine::{
    db_types::OrderId,
    events::EventProducers,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    traits::SalesMapDatabase,
    OrderFlowApi,
    SqliteDatabase,
};
use smp_common::Secret;

use crate::{
    data_objects::JsonResponse,
    helpers::calculate_hmac,
    middleware::HmacMiddlewareFactory,
    webhook_routes::{OrderPaidWebhookRoute, WEBHOOK_HMAC_HEADER},
};

const TEST_SECRET: &str = "webhook-test-secret";

const ORDER_JSON: &str = r#"{
    "order_id": "1001",
    "code": "O1",
    "event": "democon",
    "invoice_address": {"street": "1 Park Ave", "city": "New York", "zipcode": "10001", "country": "USA"},
    "paid_at": "2024-05-01T12:00:00Z"
}"#;

const ORDER_NO_ADDRESS_JSON: &str = r#"{
    "order_id": "1002",
    "code": "O2",
    "event": "democon",
    "paid_at": "2024-05-01T13:00:00Z"
}"#;

async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database")
}

async fn post_webhook(
    db: SqliteDatabase,
    body: &'static str,
    signature: Option<String>,
    hmac_checks: bool,
) -> Result<(StatusCode, String), String> {
    let api = OrderFlowApi::new(db, EventProducers::default());
    let app = App::new().app_data(web::Data::new(api)).service(
        web::scope("/incoming")
            .wrap(HmacMiddlewareFactory::new(WEBHOOK_HMAC_HEADER, Secret::new(TEST_SECRET.to_string()), hmac_checks))
            .service(OrderPaidWebhookRoute::<SqliteDatabase>::new()),
    );
    let service = test::init_service(app).await;
    let mut req = TestRequest::post()
        .uri("/incoming/order_paid")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body);
    if let Some(sig) = signature {
        req = req.insert_header((WEBHOOK_HMAC_HEADER, sig));
    }
    let (_, res) = test::try_call_service(&service, req.to_request()).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

#[actix_web::test]
async fn signed_webhook_is_processed() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let sig = calculate_hmac(TEST_SECRET, ORDER_JSON.as_bytes());
    let (status, body) = post_webhook(db.clone(), ORDER_JSON, Some(sig), true).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).expect("Body was not JSON");
    assert!(response.success);
    let order = db.fetch_order_by_order_id(&OrderId::from("1001")).await.unwrap().expect("Order was not mirrored");
    assert_eq!(order.code, "O1");
    assert_eq!(order.address.street.as_deref(), Some("1 Park Ave"));
}

#[actix_web::test]
async fn redelivered_webhook_overwrites_the_mirror() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let sig = calculate_hmac(TEST_SECRET, ORDER_JSON.as_bytes());
    post_webhook(db.clone(), ORDER_JSON, Some(sig.clone()), true).await.expect("Request failed");
    let (status, body) = post_webhook(db.clone(), ORDER_JSON, Some(sig), true).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Order already exists.");
}

#[actix_web::test]
async fn tampered_body_is_rejected() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let sig = calculate_hmac(TEST_SECRET, b"some other body entirely");
    let err = post_webhook(db.clone(), ORDER_JSON, Some(sig), true).await.expect_err("Expected error");
    assert_eq!(err, "Invalid HMAC signature.");
    assert!(db.fetch_order_by_order_id(&OrderId::from("1001")).await.unwrap().is_none());
}

#[actix_web::test]
async fn missing_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let err = post_webhook(db.clone(), ORDER_JSON, None, true).await.expect_err("Expected error");
    assert_eq!(err, "No HMAC signature found.");
}

#[actix_web::test]
async fn disabled_checks_allow_unsigned_calls() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let (status, _) = post_webhook(db.clone(), ORDER_JSON, None, false).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(db.fetch_order_by_order_id(&OrderId::from("1001")).await.unwrap().is_some());
}

#[actix_web::test]
async fn order_without_address_is_mirrored() {
    let _ = env_logger::try_init().ok();
    let db = test_db().await;
    let sig = calculate_hmac(TEST_SECRET, ORDER_NO_ADDRESS_JSON.as_bytes());
    let (status, body) =
        post_webhook(db.clone(), ORDER_NO_ADDRESS_JSON, Some(sig), true).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: JsonResponse = serde_json::from_str(&body).unwrap();
    assert!(response.success);
    let order = db.fetch_order_by_order_id(&OrderId::from("1002")).await.unwrap().expect("Order was not mirrored");
    assert!(order.address.is_empty());
}
