use async_trait::async_trait;
use std::time::Duration;

/// Set of keys with expiry. Backs the refresh-token revocation list.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Store `key` with an optional TTL, replacing any previous expiry.
    async fn set(&self, key: &str, ttl: Option<Duration>);

    /// Whether `key` is stored and not yet expired.
    async fn exists(&self, key: &str) -> bool;
}
