use actix_web::{Responder, get};

use crate::responses::error::ErrorEnvelope;
use crate::responses::session::SessionResponse;
use crate::session::CurrentSession;

/// Session attached to the request cookie
#[utoipa::path(
    tag = "Login",
    responses(
        (status = 200, description = "Live session", body = SessionResponse),
        (status = 401, description = "No session cookie, or the session is unknown or expired", body = ErrorEnvelope),
    )
)]
#[get("/api/session")]
pub async fn show(session: CurrentSession) -> impl Responder {
    SessionResponse::from(session.into_inner())
}
