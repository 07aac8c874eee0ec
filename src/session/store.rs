use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use super::{Session, SessionStore};
use crate::cache::{Cache, CacheKey, LocalCache};
use crate::config::{SessionBackend, SessionConfig};

/// Session store over any [`Cache`] backend, entries expire after `ttl`
#[derive(Debug)]
pub struct CacheSessionStore<C> {
    cache: Arc<C>,
    ttl: Duration,
}

impl<C: Cache> CacheSessionStore<C> {
    pub fn new(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}

#[async_trait]
impl<C: Cache + 'static> SessionStore for CacheSessionStore<C> {
    #[::tracing::instrument(skip(self))]
    async fn create(&self, user_id: i32) -> anyhow::Result<Session> {
        let session = Session::new(user_id);

        self.cache
            .set(&CacheKey::session(session.id), &session, self.ttl)
            .await
            .context("Failed to store session")?;

        ::tracing::debug!(session_id = %session.id, "Session created");

        Ok(session)
    }

    #[::tracing::instrument(skip(self))]
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Session>> {
        self.cache
            .get::<Session>(&CacheKey::session(id))
            .await
            .context("Failed to load session")
    }

    #[::tracing::instrument(skip(self))]
    async fn destroy(&self, id: Uuid) -> anyhow::Result<()> {
        self.cache
            .delete(&CacheKey::session(id))
            .await
            .context("Failed to remove session")?;

        ::tracing::debug!("Session destroyed");

        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.cache.ping().await
    }
}

/// Build the session store selected by `session.backend`
pub async fn from_config(config: &SessionConfig) -> anyhow::Result<Arc<dyn SessionStore>> {
    match config.backend {
        SessionBackend::Local => {
            ::tracing::info!("Using in-process session store");

            Ok(Arc::new(CacheSessionStore::new(
                Arc::new(LocalCache::new()),
                config.ttl(),
            )))
        }
        #[cfg(feature = "redis-cache")]
        SessionBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("session.redis_url must be set for the redis backend")?;
            let cache = crate::cache::RedisCache::new(url, &config.key_prefix).await?;

            ::tracing::info!("Using Redis session store");

            Ok(Arc::new(CacheSessionStore::new(
                Arc::new(cache),
                config.ttl(),
            )))
        }
        #[cfg(not(feature = "redis-cache"))]
        SessionBackend::Redis => {
            anyhow::bail!("session.backend = \"redis\" requires the redis-cache feature")
        }
    }
}
