// src/cache/memory.rs
//
// Process-local cache store.
// Expired entries read as misses and are swept on every write, so the map
// holds at most the entries written within one TTL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{CacheError, CacheResult, CacheStore};

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

#[derive(Default)]
pub struct InMemoryCacheStore {
    // Never held across an await point
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|e| e.expires_at > now).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> CacheResult<std::sync::MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| CacheError::Backend("in-memory cache lock poisoned".to_string()))
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = self.lock()?;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }

        let now = Instant::now();
        let entry = Entry {
            value: value.to_vec(),
            expires_at: now + ttl,
        };

        let mut entries = self.lock()?;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryCacheStore::new();
        store.set("a", b"1", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_key_is_a_miss() {
        let store = InMemoryCacheStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let store = InMemoryCacheStore::new();
        store.set("a", b"1", Duration::from_millis(20)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get("a").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_writes_sweep_expired_entries() {
        let store = InMemoryCacheStore::new();
        for key in ["a", "b", "c"] {
            store.set(key, b"1", Duration::from_millis(20)).await.unwrap();
        }
        store.set("long", b"2", Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;
        store.set("d", b"3", Duration::from_secs(60)).await.unwrap();

        let stored = store.entries.lock().unwrap().len();
        assert_eq!(stored, 2);
        assert_eq!(store.get("long").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_rejected() {
        let store = InMemoryCacheStore::new();
        let result = store.set("a", b"1", Duration::ZERO).await;
        assert!(matches!(result, Err(CacheError::InvalidTtl)));
        assert_eq!(store.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryCacheStore::new();
        store.set("a", b"1", Duration::from_secs(60)).await.unwrap();
        store.delete("a").await.unwrap();
        store.delete("never-set").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
    }
}
