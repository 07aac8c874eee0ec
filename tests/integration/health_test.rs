//! Health, readiness, metrics and API document endpoints

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body_json};
use serde_json::Value;

#[actix_web::test]
async fn test_health_endpoint_returns_200_ok() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().unwrap().contains('T'));
}

#[actix_web::test]
async fn test_health_db_reports_connected() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::get().uri("/health/db").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[actix_web::test]
async fn test_ready_checks_database_and_sessions() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::get().uri("/ready").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["sessions"], "available");
}

#[actix_web::test]
async fn test_ready_reports_closed_database() {
    let (service, state) = password_login::service!();
    state.db.clone().close().await.unwrap();

    let req = TestRequest::get().uri("/ready").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["database"], "disconnected");
}

#[actix_web::test]
async fn test_metrics_count_login_attempts() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::post()
        .uri("/api/login/password")
        .set_payload("not json")
        .to_request();
    call_service(&service, req).await;

    let req = TestRequest::get().uri("/metrics").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_web::test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();
    assert!(body.contains("auth_login_attempts_total"));
    assert!(body.contains("outcome=\"malformed\""));
}

#[actix_web::test]
async fn test_malformed_attempts_record_elapsed_time() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::post()
        .uri("/api/login/password")
        .set_payload("{\"username\":")
        .to_request();
    call_service(&service, req).await;

    let req = TestRequest::get().uri("/metrics").to_request();
    let resp = call_service(&service, req).await;
    let body = actix_web::test::read_body(resp).await;
    let body = std::str::from_utf8(&body).unwrap();

    let sum = body
        .lines()
        .find(|line| {
            line.starts_with("auth_login_duration_seconds_sum")
                && line.contains("outcome=\"malformed\"")
        })
        .and_then(|line| line.split_whitespace().last())
        .and_then(|value| value.parse::<f64>().ok())
        .expect("malformed duration sum is rendered");

    assert!(sum > 0.0, "malformed duration sum was {sum}");
}

#[actix_web::test]
async fn test_openapi_document_lists_login() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::get().uri("/api.json").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert!(body["paths"]["/api/login/password"]["post"].is_object());
}
