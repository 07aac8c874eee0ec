use std::time::Instant;

use actix_web::web::{Bytes, Data, Payload};
use actix_web::{HttpRequest, HttpResponse, post};
use sea_orm::DatabaseConnection;

use crate::config::SessionConfig;
use crate::errors::Error;
use crate::metrics::{AppMetrics, LoginOutcome};
use crate::requests::login::PasswordLoginRequest;
use crate::responses::error::ErrorEnvelope;
use crate::responses::login::{PasswordLoginFailure, PasswordLoginSuccess};
use crate::security::PasswordHasher;
use crate::services;
use crate::session::{SessionStore, cookie};

/// Largest login body read before the request is rejected as malformed
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Log in with a username and password
///
/// The body is read as JSON whatever its content type. Bodies over
/// [`MAX_BODY_SIZE`] are malformed. On success the session cookie is set
/// and any session the client already held is destroyed.
#[utoipa::path(
    tag = "Login",
    request_body(content = PasswordLoginRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Authenticated, session cookie set", body = PasswordLoginSuccess),
        (status = 400, description = "Body is not a JSON object with string username and password", body = ErrorEnvelope),
        (status = 401, description = "Unknown username or wrong password", body = PasswordLoginFailure),
        (status = 500, description = "Internal server error", body = ErrorEnvelope),
    )
)]
#[post("/api/login/password")]
pub async fn password(
    req: HttpRequest,
    payload: Payload,
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    sessions: Data<dyn SessionStore>,
    config: Data<SessionConfig>,
    metrics: Data<AppMetrics>,
) -> Result<HttpResponse, Error> {
    let start = Instant::now();
    let request = read(payload)
        .await
        .and_then(|body| PasswordLoginRequest::parse(&body))
        .inspect_err(|_| {
            metrics.record_login_attempt(LoginOutcome::Malformed, start.elapsed().as_secs_f64())
        })?;
    let previous = cookie::session_id(&config, &req);

    let login = services::login::password::login(
        &db,
        &hasher,
        &**sessions,
        previous,
        request,
        &metrics,
    )
    .await?;

    Ok(HttpResponse::Ok()
        .cookie(cookie::build(&config, &login.session))
        .json(PasswordLoginSuccess::new(login.user_id)))
}

async fn read(payload: Payload) -> Result<Bytes, Error> {
    match payload.to_bytes_limited(MAX_BODY_SIZE).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => {
            ::tracing::debug!(error = %e, "Failed to read login body");

            Err(Error::MalformedRequest)
        }
        Err(_) => {
            ::tracing::debug!(limit = MAX_BODY_SIZE, "Login body too large");

            Err(Error::MalformedRequest)
        }
    }
}
