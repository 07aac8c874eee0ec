//! Server-side sessions
//!
//! Handlers never reach for ambient request state: whatever needs to write or
//! read a session receives a [`SessionStore`] through `web::Data`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod cookie;
pub mod current;
pub mod store;

pub use current::CurrentSession;
pub use store::CacheSessionStore;

/// An authenticated session, addressed by the id held in the session cookie
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session for `user_id`
    async fn create(&self, user_id: i32) -> anyhow::Result<Session>;

    /// `None` for unknown or expired ids
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Session>>;

    /// Removing an unknown id is not an error
    async fn destroy(&self, id: Uuid) -> anyhow::Result<()>;

    /// Readiness of the backing store
    async fn ping(&self) -> anyhow::Result<()>;
}
