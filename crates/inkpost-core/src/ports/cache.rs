//! Cache port used for rendered post views.

use async_trait::async_trait;
use std::time::Duration;

/// Cache trait - abstraction over caching backends.
///
/// The cache is best-effort: a lost write only costs a miss, so writes do
/// not report failures.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache.
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a value in the cache with optional TTL.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>);

    /// Delete a key from the cache.
    async fn delete(&self, key: &str);

    /// Drop several keys.
    async fn invalidate(&self, keys: &[&str]) {
        for key in keys {
            self.delete(key).await;
        }
        tracing::debug!(?keys, "Cache invalidated");
    }
}
