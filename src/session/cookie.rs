use actix_web::cookie::Cookie;
use actix_web::cookie::time::Duration;
use actix_web::HttpRequest;
use uuid::Uuid;

use super::Session;
use crate::config::SessionConfig;

/// Cookie carrying the id of `session`
pub fn build(config: &SessionConfig, session: &Session) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), session.id.to_string())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site.into())
        .max_age(Duration::seconds(i64::try_from(config.ttl).unwrap_or(i64::MAX)))
        .finish()
}

/// Session id presented by the client, if the cookie is present and well formed
pub fn session_id(config: &SessionConfig, req: &HttpRequest) -> Option<Uuid> {
    let cookie = req.cookie(&config.cookie_name)?;

    Uuid::parse_str(cookie.value()).ok()
}
