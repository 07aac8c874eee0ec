pub mod app;
pub mod auth;
pub mod common;
pub mod session;

pub use app::{ApiConfig, AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig, PasswordHashAlgorithm, Pbkdf2Config};
pub use common::{
    ConfigError, DatabaseConfig, LogFormat, ObservabilityConfig, ServerConfig, Validate,
};
pub use session::{CookieSameSite, SessionBackend, SessionConfig};

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
