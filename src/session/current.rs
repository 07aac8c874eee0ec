use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};

use super::{Session, SessionStore, cookie};
use crate::config::SessionConfig;
use crate::errors::Error;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Session resolved from the request cookie
///
/// Rejects with 401 when the cookie is missing, malformed, or names a
/// session the store no longer holds.
#[derive(Clone, Debug)]
pub struct CurrentSession(pub Session);

impl CurrentSession {
    pub fn into_inner(self) -> Session {
        self.0
    }
}

impl FromRequest for CurrentSession {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = req.app_data::<Data<SessionConfig>>().cloned();
        let store = req.app_data::<Data<dyn SessionStore>>().cloned();

        let (Some(config), Some(store)) = (config, store) else {
            return Box::pin(async {
                Err(Error::internal("Session store is not registered"))
            });
        };

        let Some(id) = cookie::session_id(&config, req) else {
            return Box::pin(async { Err(Error::unauthorized(NOT_AUTHENTICATED)) });
        };

        Box::pin(async move {
            match store.find(id).await.map_err(Error::Session)? {
                Some(session) => Ok(Self(session)),
                None => {
                    ::tracing::debug!(session_id = %id, "Unknown or expired session");

                    Err(Error::unauthorized(NOT_AUTHENTICATED))
                }
            }
        })
    }
}
