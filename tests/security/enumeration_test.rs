//! Failure responses must not reveal whether a username exists

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body};
use serde_json::json;

#[actix_web::test]
async fn test_failure_bodies_are_byte_identical() {
    let (service, _state) = password_login::service!();
    let mut responses = Vec::new();

    for (username, password) in [
        ("nobody", "goodpassword"),
        ("username", "badpassword"),
        ("", ""),
    ] {
        let req = TestRequest::post()
            .uri("/api/login/password")
            .set_payload(json!({ "username": username, "password": password }).to_string())
            .to_request();
        let resp = call_service(&service, req).await;
        let status = resp.status();

        responses.push((status, read_body(resp).await));
    }

    assert_eq!(responses[0].0, StatusCode::UNAUTHORIZED);
    assert_eq!(responses[0], responses[1]);
    assert_eq!(responses[0], responses[2]);
}

#[actix_web::test]
async fn test_failures_set_no_cookie() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::post()
        .uri("/api/login/password")
        .set_payload(json!({ "username": "username", "password": "badpassword" }).to_string())
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get("set-cookie").is_none());
}
