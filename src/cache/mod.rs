//! TTL key/value backends
//!
//! Sessions are stored through the [`Cache`] trait so the same store works
//! in-process ([`LocalCache`]) or shared across instances ([`RedisCache`]).

use std::fmt::Debug;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod local;
#[cfg(feature = "redis-cache")]
pub mod redis;

pub use local::LocalCache;
#[cfg(feature = "redis-cache")]
pub use redis::RedisCache;

#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// `None` when the key is absent or expired
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send;

    /// Store a value that expires after `ttl`
    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync;

    async fn delete(&self, key: &str) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Round trip used by readiness probes
    async fn ping(&self) -> Result<()>;

    async fn stats(&self) -> Result<CacheStats>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped because they expired or were deleted
    pub evictions: u64,
    /// Live entries, when the backend can tell
    pub size: usize,
    /// 0.0 to 1.0
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(hits: u64, misses: u64, evictions: u64, size: usize) -> Self {
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        Self {
            hits,
            misses,
            evictions,
            size,
            hit_rate,
        }
    }
}

/// Builder for consistent cache key naming
pub struct CacheKey;

impl CacheKey {
    pub fn session(id: impl std::fmt::Display) -> String {
        format!("session:{}", id)
    }
}
