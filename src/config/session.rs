use std::time::Duration;

use actix_web::cookie::SameSite;
use serde::{Deserialize, Serialize};

use super::common::{ConfigError, Validate, invalid};

/// Session cookie and storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds, also the cookie Max-Age
    #[serde(default = "default_ttl")]
    pub ttl: u64,
    /// Only send the cookie over HTTPS
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_same_site")]
    pub same_site: CookieSameSite,
    #[serde(default = "default_backend")]
    pub backend: SessionBackend,
    /// Redis connection URL, required for the redis backend
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Key namespace inside a shared Redis
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// In-process sharded map, sessions are lost on restart
    Local,
    /// Shared Redis, requires the `redis-cache` feature
    Redis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieSameSite {
    Strict,
    Lax,
    None,
}

impl From<CookieSameSite> for SameSite {
    fn from(value: CookieSameSite) -> Self {
        match value {
            CookieSameSite::Strict => SameSite::Strict,
            CookieSameSite::Lax => SameSite::Lax,
            CookieSameSite::None => SameSite::None,
        }
    }
}

/// Longest accepted session lifetime, ten years
pub const MAX_TTL: u64 = 60 * 60 * 24 * 365 * 10;

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_ttl() -> u64 {
    60 * 60 * 24 // 1 day
}

fn default_same_site() -> CookieSameSite {
    CookieSameSite::Lax
}

fn default_backend() -> SessionBackend {
    SessionBackend::Local
}

fn default_key_prefix() -> String {
    "password-login".to_string()
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl: default_ttl(),
            secure: false,
            same_site: default_same_site(),
            backend: default_backend(),
            redis_url: None,
            key_prefix: default_key_prefix(),
        }
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.cookie_name.is_empty() {
            return invalid("session.cookie_name cannot be empty");
        }
        if self.ttl == 0 {
            return invalid("session.ttl must be > 0");
        }
        if self.ttl > MAX_TTL {
            return invalid(format!("session.ttl must be <= {MAX_TTL}"));
        }
        // browsers drop SameSite=None cookies that are not Secure
        if self.same_site == CookieSameSite::None && !self.secure {
            return invalid("session.same_site = \"none\" requires session.secure = true");
        }
        if self.backend == SessionBackend::Redis {
            if cfg!(not(feature = "redis-cache")) {
                return invalid("session.backend = \"redis\" requires the redis-cache feature");
            }
            if self.redis_url.as_deref().is_none_or(str::is_empty) {
                return invalid("session.redis_url must be set for the redis backend");
            }
        }
        Ok(())
    }
}
