//! SQL injection through the login body
//!
//! SeaORM binds every value as a parameter, so hostile usernames and
//! passwords must be treated as literal data: the login fails with the
//! ordinary envelope and the tables stay intact.

use actix_web::http::StatusCode;
use actix_web::test::{TestRequest, call_service, read_body_json};
use password_login::entities::{logins, users};
use sea_orm::EntityTrait;
use serde_json::{Value, json};

const PAYLOADS: [&str; 6] = [
    "' OR '1'='1",
    "' OR 1=1 --",
    "username' --",
    "username'; DROP TABLE logins; --",
    "\" OR \"\"=\"",
    "' UNION SELECT 'username', 'x' --",
];

#[actix_web::test]
async fn test_sql_injection_in_username() {
    let (service, state) = password_login::service!();

    for username in PAYLOADS {
        let req = TestRequest::post()
            .uri("/api/login/password")
            .set_payload(json!({ "username": username, "password": "goodpassword" }).to_string())
            .to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", username);

        let body: Value = read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    assert_eq!(users::Entity::find().all(&state.db).await.unwrap().len(), 1);
    assert_eq!(logins::Entity::find().all(&state.db).await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_sql_injection_in_password() {
    let (service, state) = password_login::service!();

    for password in PAYLOADS {
        let req = TestRequest::post()
            .uri("/api/login/password")
            .set_payload(json!({ "username": "username", "password": password }).to_string())
            .to_request();
        let resp = call_service(&service, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", password);
    }

    let login = logins::Entity::find_by_id("username")
        .one(&state.db)
        .await
        .unwrap();
    assert!(login.is_some());
}
