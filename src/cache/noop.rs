// src/cache/noop.rs

use std::time::Duration;

use async_trait::async_trait;

use super::{CacheResult, CacheStore};

/// Disabled cache: every read misses, every write is dropped.
///
/// Used when no cache store is configured and in tests that must observe
/// every upstream request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheStore;

#[async_trait]
impl CacheStore for NoopCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_always_misses() {
        let store = NoopCacheStore;
        store.set("k", b"v", Duration::from_secs(60)).await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        store.delete("k").await.unwrap();
    }
}
