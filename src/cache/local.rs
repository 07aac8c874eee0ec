use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::{Cache, CacheStats};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Entry {
    /// bincode encoded value
    data: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

/// In-process cache on a sharded `DashMap`
///
/// Expired entries are dropped lazily on access and by a sweeper task that
/// runs every minute for as long as the cache lives. Must be created inside
/// a Tokio runtime.
#[derive(Debug)]
pub struct LocalCache {
    store: Arc<DashMap<String, Entry>>,
    counters: Arc<Counters>,
    sweeper: JoinHandle<()>,
}

impl LocalCache {
    /// Shard count of CPU count * 4, rounded up to a power of two
    pub fn new() -> Self {
        Self::with_shard_count((num_cpus::get() * 4).next_power_of_two())
    }

    /// `shard_count` must be a power of two greater than one
    pub fn with_shard_count(shard_count: usize) -> Self {
        let store = Arc::new(DashMap::with_shard_amount(shard_count));
        let counters = Arc::new(Counters::default());
        let sweeper = Self::sweep(Arc::clone(&store), Arc::clone(&counters));

        Self {
            store,
            counters,
            sweeper,
        }
    }

    fn sweep(store: Arc<DashMap<String, Entry>>, counters: Arc<Counters>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);

            loop {
                interval.tick().await;

                let now = Instant::now();
                let before = store.len();
                store.retain(|_, entry| !entry.is_expired(now));
                let swept = before.saturating_sub(store.len()) as u64;

                if swept > 0 {
                    counters.evictions.fetch_add(swept, Ordering::Relaxed);
                    ::tracing::debug!(swept, "Swept expired cache entries");
                }
            }
        })
    }

    /// Drop `key` if it has expired, reporting whether it did
    fn expire(&self, key: &str) -> bool {
        let now = Instant::now();

        if self
            .store
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            self.counters.evictions.fetch_add(1, Ordering::Relaxed);
            return true;
        }

        false
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocalCache {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

#[async_trait]
impl Cache for LocalCache {
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send,
    {
        if self.expire(key) {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(None);
        }

        let Some(entry) = self.store.get(key) else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
            return Ok(None);
        };

        let value = bincode::deserialize(&entry.data)
            .context("Failed to deserialize cached value")?;
        self.counters.hits.fetch_add(1, Ordering::Relaxed);

        Ok(Some(value))
    }

    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let data = bincode::serialize(value).context("Failed to serialize value")?;
        let entry = Entry {
            data,
            expires_at: Instant::now() + ttl,
        };

        self.store.insert(key.to_string(), entry);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.store.remove(key).is_some() {
            self.counters.evictions.fetch_add(1, Ordering::Relaxed);
        }

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        if self.expire(key) {
            return Ok(false);
        }

        Ok(self.store.contains_key(key))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new(
            self.counters.hits.load(Ordering::Relaxed),
            self.counters.misses.load(Ordering::Relaxed),
            self.counters.evictions.load(Ordering::Relaxed),
            self.store.len(),
        ))
    }
}
