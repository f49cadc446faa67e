//! Caching layer for formatted market-data responses
//!
//! Keys are operation-tagged strings derived from the raw user query
//! (`price_apple`), so textually different queries that resolve to the
//! same ticker are cached independently. Stale entries are treated as
//! absent on read and overwritten by the next insert; only `clear`
//! removes them eagerly.

use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Thread-safe TTL cache for formatted response strings
pub struct ResponseCache {
    cache: Arc<RwLock<TimedCache<String, String>>>,
}

impl ResponseCache {
    /// Create a new cache with the specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a value from the cache, missing when the entry is stale
    pub async fn get(&self, key: &str) -> Option<String> {
        let key = key.to_string();
        let mut cache = self.cache.write().await;
        cache.cache_get(&key).cloned()
    }

    /// Insert a value, overwriting any existing entry for the key
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key.into(), value.into());
    }

    /// Get or compute a value using the provided fetcher.
    ///
    /// The write lock is held across the fetch, so concurrent callers for
    /// the same key cannot trigger duplicate fetches. Coarse, but the
    /// fetch volume here is one user query at a time.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: impl Into<String>,
        fetcher: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<String, E>>,
    {
        let key = key.into();
        let mut cache = self.cache.write().await;

        if let Some(value) = cache.cache_get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(value.clone());
        }

        tracing::debug!(key = %key, "cache miss");
        let value = fetcher().await?;
        let _ = cache.cache_set(key, value.clone());
        Ok(value)
    }

    /// Remove all entries immediately
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Number of stored entries, stale ones included
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for ResponseCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("price_apple", "AAPL at $150.25").await;

        assert_eq!(
            cache.get("price_apple").await,
            Some("AAPL at $150.25".to_string())
        );
    }

    #[tokio::test]
    async fn test_miss_after_ttl() {
        let cache = ResponseCache::new(Duration::from_millis(20));
        cache.insert("price_apple", "stale soon").await;

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get("price_apple").await, None);
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("k", "first").await;
        cache.insert("k", "second").await;

        assert_eq!(cache.get("k").await, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_clear_evicts_everything() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        for i in 0..5 {
            cache.insert(format!("key{}", i), "v").await;
        }
        assert_eq!(cache.len().await, 5);

        cache.clear().await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("key0").await, None);
    }

    #[tokio::test]
    async fn test_get_or_fetch_calls_fetcher_once() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let mut calls = 0;

        let value = cache
            .get_or_fetch("k", || {
                calls += 1;
                async { Ok::<_, String>("fetched".to_string()) }
            })
            .await
            .unwrap();
        assert_eq!(value, "fetched");
        assert_eq!(calls, 1);

        let value = cache
            .get_or_fetch("k", || {
                calls += 1;
                async { Ok::<_, String>("refetched".to_string()) }
            })
            .await
            .unwrap();
        assert_eq!(value, "fetched");
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let handle = cache.clone();

        cache.insert("shared", "yes").await;
        assert_eq!(handle.get("shared").await, Some("yes".to_string()));
    }
}
