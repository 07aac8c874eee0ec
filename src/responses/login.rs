use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::INVALID_CREDENTIALS;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct PasswordLoginSuccess {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 1)]
    pub user_id: i32,
}

impl PasswordLoginSuccess {
    pub fn new(user_id: i32) -> Self {
        Self {
            success: true,
            user_id,
        }
    }
}

impl Responder for PasswordLoginSuccess {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}

/// Documents the invalid credentials envelope, built by [`crate::errors::Error`]
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct PasswordLoginFailure {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Username does not exist or password is invalid.")]
    pub message: String,
}

impl Default for PasswordLoginFailure {
    fn default() -> Self {
        Self {
            success: false,
            message: INVALID_CREDENTIALS.to_string(),
        }
    }
}
