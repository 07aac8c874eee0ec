//! Session storage through the public cache types

use std::sync::Arc;
use std::time::Duration;

use password_login::cache::{Cache, CacheKey, LocalCache};
use password_login::session::{CacheSessionStore, Session, SessionStore};

#[tokio::test]
async fn test_sessions_are_stored_under_session_keys() {
    let cache = Arc::new(LocalCache::new());
    let store = CacheSessionStore::new(Arc::clone(&cache), Duration::from_secs(60));

    let session = store.create(42).await.unwrap();

    let cached: Option<Session> = cache.get(&CacheKey::session(session.id)).await.unwrap();
    assert_eq!(cached, Some(session.clone()));

    store.destroy(session.id).await.unwrap();
    assert!(!cache.exists(&CacheKey::session(session.id)).await.unwrap());
}

#[tokio::test]
async fn test_store_behind_trait_object() {
    let store: Arc<dyn SessionStore> = Arc::new(CacheSessionStore::new(
        Arc::new(LocalCache::new()),
        Duration::from_secs(60),
    ));

    let first = store.create(1).await.unwrap();
    let second = store.create(2).await.unwrap();

    assert_eq!(store.find(first.id).await.unwrap().map(|s| s.user_id), Some(1));
    assert_eq!(store.find(second.id).await.unwrap().map(|s| s.user_id), Some(2));
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
async fn test_session_lifetime_follows_ttl() {
    let store = CacheSessionStore::new(Arc::new(LocalCache::new()), Duration::from_millis(100));
    let session = store.create(1).await.unwrap();

    assert!(store.find(session.id).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(store.find(session.id).await.unwrap(), None);
}
