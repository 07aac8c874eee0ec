//! HTTP-facing error type
//!
//! Every failure a handler can produce is mapped onto one of the JSON
//! envelopes the API exposes. Internal details are logged, never returned.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

use crate::security::PasswordError;

pub const MALFORMED_REQUEST: &str = "Malformed request";
pub const INVALID_CREDENTIALS: &str = "Username does not exist or password is invalid.";

#[derive(Debug, Error)]
pub enum Error {
    /// Body is not JSON or not the expected shape
    #[error("Malformed request")]
    MalformedRequest,

    /// Unknown username and wrong password share this variant
    #[error("Username does not exist or password is invalid.")]
    InvalidCredentials,

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Password hashing error: {0}")]
    Password(#[from] PasswordError),

    #[error("Session store error: {0:#}")]
    Session(anyhow::Error),

    #[error("{message}")]
    InternalServerError { message: String },
}

impl Error {
    pub fn unauthorized<T: ToString>(message: T) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    pub fn internal<T: ToString>(message: T) -> Self {
        Self::InternalServerError {
            message: message.to_string(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Database(_)
            | Self::Password(_)
            | Self::Session(_)
            | Self::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::MalformedRequest => json!({ "error": MALFORMED_REQUEST }),
            Self::InvalidCredentials => json!({
                "success": false,
                "message": INVALID_CREDENTIALS,
            }),
            Self::Unauthorized { message } => json!({ "error": message }),
            e => {
                ::tracing::error!(error = %e, "Request failed");

                json!({ "error": "Internal server error" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
