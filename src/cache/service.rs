// src/cache/service.rs
//
// Typed JSON facade over a `CacheStore`.
//
// Every failure mode (unreachable backend, timeout, malformed stored value,
// unserializable value) degrades to a miss or a dropped write and is logged.
// Callers never see a cache error.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{CacheError, CacheStore, NoopCacheStore};

/// Default bound on a single cache operation; far below the catalog timeout
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStore>,
    op_timeout: Duration,
    enabled: bool,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            op_timeout: DEFAULT_CACHE_TIMEOUT,
            enabled: true,
        }
    }

    /// A cache that always misses and never stores
    pub fn disabled() -> Self {
        Self {
            store: Arc::new(NoopCacheStore),
            op_timeout: DEFAULT_CACHE_TIMEOUT,
            enabled: false,
        }
    }

    pub fn with_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `Some` only on a hit that decodes cleanly
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let bytes = match tokio::time::timeout(self.op_timeout, self.store.get(key)).await {
            Ok(Ok(Some(bytes))) => bytes,
            Ok(Ok(None)) => {
                log::debug!("Cache miss: {}", key);
                return None;
            }
            Ok(Err(e)) => {
                log::warn!("Cache read failed for {}, treating as miss: {}", key, e);
                return None;
            }
            Err(_) => {
                log::warn!("Cache read timed out for {}, treating as miss", key);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                log::debug!("Cache hit: {}", key);
                Some(value)
            }
            Err(e) => {
                log::warn!("Malformed cache entry for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Best effort: a failed write only costs a future miss
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        if !self.enabled {
            return;
        }
        if ttl.is_zero() {
            log::warn!("Refusing to cache {} without a TTL", key);
            return;
        }

        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Could not serialize cache entry for {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.bounded(self.store.set(key, &bytes, ttl)).await {
            log::warn!("Cache write failed for {}: {}", key, e);
        }
    }

    pub async fn delete(&self, key: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.bounded(self.store.delete(key)).await {
            log::warn!("Cache delete failed for {}: {}", key, e);
        }
    }

    async fn bounded<F>(&self, op: F) -> Result<(), CacheError>
    where
        F: std::future::Future<Output = Result<(), CacheError>>,
    {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout),
        }
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("enabled", &self.enabled)
            .field("op_timeout", &self.op_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheResult, InMemoryCacheStore};
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: i64,
        title: String,
    }

    /// Backend that is down
    struct FailingStore;

    #[async_trait]
    impl CacheStore for FailingStore {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
        async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
    }

    /// Backend that never answers
    struct HangingStore;

    #[async_trait]
    impl CacheStore for HangingStore {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            std::future::pending().await
        }
        async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
            std::future::pending().await
        }
        async fn delete(&self, _key: &str) -> CacheResult<()> {
            std::future::pending().await
        }
    }

    fn payload() -> Payload {
        Payload {
            id: 27205,
            title: "Inception".to_string(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_store() {
        let cache = CacheService::new(Arc::new(InMemoryCacheStore::new()));
        cache.set_json("k", &payload(), Duration::from_secs(60)).await;

        assert_eq!(cache.get_json::<Payload>("k").await, Some(payload()));
    }

    #[tokio::test]
    async fn test_malformed_entry_is_a_miss() {
        let store = Arc::new(InMemoryCacheStore::new());
        store.set("k", b"{not json", Duration::from_secs(60)).await.unwrap();

        let cache = CacheService::new(store);
        assert_eq!(cache.get_json::<Payload>("k").await, None);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_miss() {
        let store = Arc::new(InMemoryCacheStore::new());
        store.set("k", br#"{"unexpected": true}"#, Duration::from_secs(60)).await.unwrap();

        let cache = CacheService::new(store);
        assert_eq!(cache.get_json::<Payload>("k").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_degrades() {
        let cache = CacheService::new(Arc::new(FailingStore));

        cache.set_json("k", &payload(), Duration::from_secs(60)).await;
        assert_eq!(cache.get_json::<Payload>("k").await, None);
        cache.delete("k").await;
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_as_miss() {
        let cache = CacheService::new(Arc::new(HangingStore)).with_timeout(Duration::from_millis(20));

        let started = std::time::Instant::now();
        assert_eq!(cache.get_json::<Payload>("k").await, None);
        cache.set_json("k", &payload(), Duration::from_secs(60)).await;
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_not_written() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CacheService::new(store.clone());

        cache.set_json("k", &payload(), Duration::ZERO).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = CacheService::new(Arc::new(InMemoryCacheStore::new()));
        cache.set_json("k", &payload(), Duration::from_secs(60)).await;
        cache.delete("k").await;

        assert_eq!(cache.get_json::<Payload>("k").await, None);
    }

    #[tokio::test]
    async fn test_disabled_cache_never_hits() {
        let cache = CacheService::disabled();
        assert!(!cache.is_enabled());

        cache.set_json("k", &payload(), Duration::from_secs(60)).await;
        assert_eq!(cache.get_json::<Payload>("k").await, None);
    }
}
