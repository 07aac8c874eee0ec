use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use super::{Cache, CacheStats};

/// Redis-backed cache shared between service instances
///
/// Keys are namespaced with `<prefix>:` and expire through `SET EX`, so
/// Redis owns expiry. Values are bincode encoded.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    prefix: String,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl RedisCache {
    /// Connect with a 3 second timeout
    ///
    /// # Example
    /// ```no_run
    /// use password_login::cache::RedisCache;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let cache = RedisCache::new("redis://localhost:6379", "password-login").await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(url: &str, prefix: &str) -> Result<Self> {
        Self::with_timeout(url, prefix, Duration::from_secs(3)).await
    }

    pub async fn with_timeout(url: &str, prefix: &str, connect_timeout: Duration) -> Result<Self> {
        let client = Client::open(url).context("Failed to create Redis client")?;

        let connection = timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .with_context(|| {
                format!(
                    "Redis connection timeout after {:?}. Check Redis is running at: {}",
                    connect_timeout, url
                )
            })?
            .context("Failed to create Redis connection manager")?;

        Ok(Self {
            connection,
            prefix: format!("{}:", prefix),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            evictions: Arc::new(AtomicU64::new(0)),
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("prefix", &self.prefix)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .field("evictions", &self.evictions)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Cache for RedisCache {
    #[tracing::instrument(skip(self), fields(cache_key = %key))]
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send,
    {
        let mut conn = self.connection.clone();
        let data: Option<Vec<u8>> = conn
            .get(self.key(key))
            .await
            .context("Failed to get value from Redis")?;

        let Some(bytes) = data else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(None);
        };

        let value = bincode::deserialize(&bytes).context("Failed to deserialize cached value")?;
        self.hits.fetch_add(1, Ordering::Relaxed);

        Ok(Some(value))
    }

    #[tracing::instrument(skip(self, value), fields(cache_key = %key, ttl_secs = ttl.as_secs()))]
    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let data = bincode::serialize(value).context("Failed to serialize value")?;
        let mut conn = self.connection.clone();

        // SET EX rejects 0
        let _: () = conn
            .set_ex(self.key(key), data, ttl.as_secs().max(1))
            .await
            .context("Failed to set value in Redis")?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(cache_key = %key))]
    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let deleted: u64 = conn
            .del(self.key(key))
            .await
            .context("Failed to delete value from Redis")?;

        self.evictions.fetch_add(deleted, Ordering::Relaxed);

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(cache_key = %key))]
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();

        conn.exists(self.key(key))
            .await
            .context("Failed to check if key exists in Redis")
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Redis did not answer PING")?;

        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        // counting keys would need a SCAN over the namespace
        Ok(CacheStats::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.evictions.load(Ordering::Relaxed),
            0,
        ))
    }
}
