//! `GET /api/session` and the cookie issued by a login

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body_json};
use serde_json::{Value, json};
use uuid::Uuid;

#[actix_web::test]
async fn test_login_cookie_resolves_to_session() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::post()
        .uri("/api/login/password")
        .set_payload(r#"{"username":"username","password":"goodpassword"}"#)
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| Cookie::new("session", cookie.value().to_string()))
        .expect("session cookie should be set");

    let req = TestRequest::get()
        .uri("/api/session")
        .cookie(cookie)
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({ "user_id": 1 }));
}

#[actix_web::test]
async fn test_missing_cookie_is_not_authenticated() {
    let (service, _state) = password_login::service!();

    let req = TestRequest::get().uri("/api/session").to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Not authenticated" }));
}

#[actix_web::test]
async fn test_unknown_or_garbled_cookie_is_not_authenticated() {
    let (service, _state) = password_login::service!();

    for value in [Uuid::new_v4().to_string(), "garbage".to_string()] {
        let req = TestRequest::get()
            .uri("/api/session")
            .cookie(Cookie::new("session", value.clone()))
            .to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", value);
    }
}

#[actix_web::test]
async fn test_destroyed_session_is_not_authenticated() {
    let (service, state) = password_login::service!();
    let session = state.sessions.create(1).await.unwrap();
    state.sessions.destroy(session.id).await.unwrap();

    let req = TestRequest::get()
        .uri("/api/session")
        .cookie(Cookie::new("session", session.id.to_string()))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
