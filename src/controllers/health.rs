//! Liveness and readiness probes

use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder, get};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::session::SessionStore;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
    pub sessions: String,
}

/// Always 200 while the process serves requests
#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = LivenessResponse),
    )
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    Json(LivenessResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
    })
}

/// Database connectivity
#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = DatabaseHealthResponse),
        (status = 503, description = "Database unavailable", body = DatabaseHealthResponse),
    )
)]
#[get("/health/db")]
pub async fn health_db(db: Data<DatabaseConnection>) -> impl Responder {
    let connected = db.ping().await.is_ok();

    let response = DatabaseHealthResponse {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    };

    if connected {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Ready when both the database and the session store answer
#[utoipa::path(
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadinessResponse),
        (status = 503, description = "Service is not ready", body = ReadinessResponse),
    )
)]
#[get("/ready")]
pub async fn ready(db: Data<DatabaseConnection>, sessions: Data<dyn SessionStore>) -> impl Responder {
    let database = db.ping().await.is_ok();
    let store = match sessions.ping().await {
        Ok(()) => true,
        Err(e) => {
            ::tracing::warn!(error = %e, "Session store is not answering");
            false
        }
    };
    let status = if database && store { "ready" } else { "not_ready" };

    let response = ReadinessResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        database: if database { "connected" } else { "disconnected" }.to_string(),
        sessions: if store { "available" } else { "unavailable" }.to_string(),
    };

    ::tracing::debug!(status, database, sessions = store, "Readiness check performed");

    if database && store {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
