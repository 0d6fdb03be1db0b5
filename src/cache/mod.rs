// src/cache/mod.rs
//
// Cache-Aside Store
//
// CRITICAL RULES:
// - The cache is advisory, never authoritative
// - Absence is a miss, never an error
// - Every write carries an explicit TTL (no infinite entries)
// - Backend failures never surface past `CacheService`
// - No read-modify-write atomicity: lost or duplicate writes are tolerated

pub mod memory;
pub mod noop;
pub mod redis_store;
pub mod service;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::InMemoryCacheStore;
pub use noop::NoopCacheStore;
pub use redis_store::RedisCacheStore;
pub use service::{CacheService, DEFAULT_CACHE_TIMEOUT};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache operation timed out")]
    Timeout,

    #[error("Cache entries require a non-zero TTL")]
    InvalidTtl,
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Byte-oriented key-value store with per-entry expiration.
///
/// Shared by every catalog client instance; knows nothing about movies.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` for missing or expired keys
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    async fn delete(&self, key: &str) -> CacheResult<()>;
}
