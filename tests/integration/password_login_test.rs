//! `POST /api/login/password` against the fixture user
//!
//! The fixture holds user 1, username "username", whose stored hash is the
//! salted PBKDF2-SHA512 digest of "goodpassword".

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body_json};
use password_login::testing::setup;
use serde_json::{Value, json};

fn invalid_credentials() -> Value {
    json!({
        "success": false,
        "message": "Username does not exist or password is invalid.",
    })
}

fn login_request(body: Value) -> TestRequest {
    TestRequest::post()
        .uri("/api/login/password")
        .set_payload(body.to_string())
}

#[actix_web::test]
async fn test_non_json_body_is_malformed() {
    let (service, _state) = password_login::service!();

    for payload in ["", "username=username&password=goodpassword", "{", "null"] {
        let req = TestRequest::post()
            .uri("/api/login/password")
            .set_payload(payload)
            .to_request();

        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{:?}", payload);

        let body: Value = read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Malformed request" }));
    }
}

#[actix_web::test]
async fn test_wrong_shape_is_malformed() {
    let (service, _state) = password_login::service!();

    for body in [
        json!({ "username": "username" }),
        json!({ "password": "goodpassword" }),
        json!({ "username": 1, "password": "goodpassword" }),
        json!({ "username": "username", "password": ["goodpassword"] }),
        json!(["username", "goodpassword"]),
    ] {
        let resp = call_service(&service, login_request(body.clone()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);

        let body: Value = read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Malformed request" }));
    }
}

#[actix_web::test]
async fn test_oversized_body_is_malformed() {
    let (service, _state) = password_login::service!();
    let padded = json!({
        "username": "username",
        "password": "goodpassword",
        "pad": "x".repeat(300_000),
    });

    for payload in ["x".repeat(300_000), padded.to_string()] {
        let req = TestRequest::post()
            .uri("/api/login/password")
            .set_payload(payload)
            .to_request();

        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.response().cookies().next().is_none());

        let body: Value = read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Malformed request" }));
    }
}

#[actix_web::test]
async fn test_body_under_limit_with_extra_fields_authenticates() {
    let (service, _state) = password_login::service!();
    let body = json!({
        "username": "username",
        "password": "goodpassword",
        "pad": "x".repeat(password_login::controllers::login::MAX_BODY_SIZE / 2),
    });

    let resp = call_service(&service, login_request(body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unknown_username() {
    let (service, _state) = password_login::service!();

    let req = login_request(json!({ "username": "nobody", "password": "goodpassword" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.response().cookies().next().is_none());

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, invalid_credentials());
}

#[actix_web::test]
async fn test_wrong_password_matches_unknown_username() {
    let (service, _state) = password_login::service!();

    let unknown = call_service(
        &service,
        login_request(json!({ "username": "nobody", "password": "badpassword" })).to_request(),
    )
    .await;
    let wrong = call_service(
        &service,
        login_request(json!({ "username": "username", "password": "badpassword" })).to_request(),
    )
    .await;

    assert_eq!(unknown.status(), wrong.status());

    let unknown: Value = read_body_json(unknown).await;
    let wrong: Value = read_body_json(wrong).await;
    assert_eq!(unknown, wrong);
    assert_eq!(wrong, invalid_credentials());
}

#[actix_web::test]
async fn test_username_is_matched_exactly() {
    let (service, _state) = password_login::service!();

    for username in ["Username", "USERNAME", " username", "username "] {
        let req = login_request(json!({ "username": username, "password": "goodpassword" }))
            .to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{:?}", username);
    }
}

#[actix_web::test]
async fn test_good_password_logs_in() {
    let (service, state) = password_login::service!();

    let req = login_request(json!({ "username": "username", "password": "goodpassword" }))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie should be set");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    let id = cookie.value().parse().expect("cookie should hold a session id");

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "user_id": 1 }));

    let session = state.sessions.find(id).await.unwrap().unwrap();
    assert_eq!(session.user_id, 1);
}

#[actix_web::test]
async fn test_content_type_is_ignored() {
    let (service, _state) = password_login::service!();

    let req = login_request(json!({ "username": "username", "password": "goodpassword" }))
        .insert_header(("content-type", "text/plain"))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_repeated_login_gives_same_envelope() {
    let (service, _state) = password_login::service!();

    for _ in 0..3 {
        let req = login_request(json!({ "username": "username", "password": "goodpassword" }))
            .to_request();
        let resp = call_service(&service, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = read_body_json(resp).await;
        assert_eq!(body, json!({ "success": true, "user_id": 1 }));
    }
}

#[actix_web::test]
async fn test_new_login_invalidates_previous_session() {
    let (service, state) = password_login::service!();
    let previous = state.sessions.create(1).await.unwrap();

    let req = login_request(json!({ "username": "username", "password": "goodpassword" }))
        .cookie(Cookie::new("session", previous.id.to_string()))
        .to_request();
    let resp = call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.sessions.find(previous.id).await.unwrap(), None);
}

#[actix_web::test]
async fn test_argon2_credentials_authenticate() {
    let state = password_login::testing::instance::state().await;
    let argon2 = password_login::PasswordHasher::from_config(
        &password_login::config::AuthConfig {
            password_hash_algorithm: password_login::config::PasswordHashAlgorithm::Argon2,
            argon2: password_login::config::Argon2Config {
                memory_cost: 19456,
                time_cost: 1,
                parallelism: 1,
                hash_length: 32,
            },
            ..Default::default()
        },
    )
    .unwrap();
    let stored = argon2.hash("correct horse").unwrap();
    assert!(stored.starts_with("$argon2id$"));

    setup::create_login(&state.db, 2, "argon", &stored)
        .await
        .unwrap();

    let (service, _state) = password_login::service!(state);

    let req = login_request(json!({ "username": "argon", "password": "correct horse" }))
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body, json!({ "success": true, "user_id": 2 }));

    let req = login_request(json!({ "username": "argon", "password": "battery staple" }))
        .to_request();
    let resp = call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
