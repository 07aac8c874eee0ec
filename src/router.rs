use actix_web::web::{self, ServiceConfig};
use utoipa::OpenApi;
use utoipa_swagger_ui::{SwaggerUi, Url};

use crate::api::Definition;
use crate::controllers;

pub fn route(app: &mut ServiceConfig) {
    // Login
    app.service(controllers::login::password);
    app.service(controllers::session::show);

    // Health check endpoints
    app.service(controllers::health::health);
    app.service(controllers::health::health_db);
    app.service(controllers::health::ready);

    // Metrics endpoint
    app.service(controllers::metrics::metrics);
}

/// Swagger UI under /docs/ and the OpenAPI document at /api.json
pub fn docs(app: &mut ServiceConfig) {
    app.service(web::redirect("/docs", "/docs/"));
    app.service(SwaggerUi::new("/docs/{_:.*}").urls(vec![(
        Url::new("Password login", "/api.json"),
        Definition::openapi(),
    )]));
}
