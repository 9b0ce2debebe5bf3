//! In-memory cache. Holds the refresh-token revocation list.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::Cache;

struct CacheEntry {
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|exp| now <= exp)
    }
}

/// In-memory cache: keys with optional expiry in a HashMap behind an async RwLock.
///
/// Entries are per-process and lost on restart. Expired entries are
/// dropped lazily on read and in bulk whenever a write happens.
pub struct InMemoryCache {
    store: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live entries.
    #[cfg(test)]
    async fn len(&self) -> usize {
        let now = Instant::now();
        self.store
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn set(&self, key: &str, ttl: Option<Duration>) {
        let now = Instant::now();
        let mut store = self.store.write().await;
        store.retain(|_, entry| entry.is_live(now));

        store.insert(
            key.to_string(),
            CacheEntry {
                expires_at: ttl.map(|d| now + d),
            },
        );
    }

    async fn exists(&self, key: &str) -> bool {
        let store = self.store.read().await;
        match store.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => true,
            Some(_) => {
                drop(store);
                self.store.write().await.remove(key);
                false
            }
            None => false,
        }
    }
}
