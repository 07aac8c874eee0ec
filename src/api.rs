use utoipa::OpenApi;

use crate::{controllers, requests, responses};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Login", description = "Password login and session lookup"),
        (name = "Health"),
    ),
    paths(
        controllers::login::password,
        controllers::session::show,

        controllers::health::health,
        controllers::health::health_db,
        controllers::health::ready,
    ),
    components(schemas(
        requests::login::PasswordLoginRequest,

        responses::login::PasswordLoginSuccess,
        responses::login::PasswordLoginFailure,
        responses::session::SessionResponse,
        responses::error::ErrorEnvelope,

        controllers::health::LivenessResponse,
        controllers::health::DatabaseHealthResponse,
        controllers::health::ReadinessResponse,
    )),
)]
pub struct Definition;
