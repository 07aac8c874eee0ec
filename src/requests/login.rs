use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::Error;

#[derive(Clone, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct PasswordLoginRequest {
    #[schema(example = "username")]
    pub username: String,
    #[schema(example = "goodpassword")]
    pub password: String,
}

impl PasswordLoginRequest {
    /// Decode a raw request body
    ///
    /// The body is read as JSON whatever the declared content type. Anything
    /// that is not an object with string `username` and `password` fields is
    /// [`Error::MalformedRequest`].
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        let value = serde_json::from_slice::<Value>(body).map_err(|e| {
            ::tracing::debug!(error = %e, "Login body is not JSON");

            Error::MalformedRequest
        })?;

        // derived impls would also accept a two element array
        if !value.is_object() {
            return Err(Error::MalformedRequest);
        }

        serde_json::from_value(value).map_err(|e| {
            ::tracing::debug!(error = %e, "Login body has the wrong shape");

            Error::MalformedRequest
        })
    }
}

impl fmt::Debug for PasswordLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordLoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
