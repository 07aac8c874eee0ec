pub mod api;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod requests;
pub mod responses;
pub mod router;
pub mod security;
pub mod server;
pub mod services;
pub mod session;
pub mod telemetry;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use cache::{Cache, CacheKey, CacheStats, LocalCache};
#[cfg(feature = "redis-cache")]
pub use cache::RedisCache;
pub use errors::Error;
pub use metrics::AppMetrics;
pub use security::PasswordHasher;
pub use session::{CurrentSession, Session, SessionStore};
