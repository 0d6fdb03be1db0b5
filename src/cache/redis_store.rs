// src/cache/redis_store.rs
//
// Redis-backed cache store.
//
// The connection is opened lazily on first use. A connection that fails
// with a transport error is dropped from the slot, so the next operation
// reconnects. An unreachable Redis never blocks bootstrap.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use tokio::sync::Mutex;

use super::{CacheError, CacheResult, CacheStore};

pub struct RedisCacheStore {
    client: redis::Client,
    prefix: String,
    shared: Mutex<Option<MultiplexedConnection>>,
}

impl RedisCacheStore {
    /// Parses the URL only; no network I/O happens here.
    pub fn new(url: &str, prefix: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            prefix: prefix.to_string(),
            shared: Mutex::new(None),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }

    async fn connection(&self) -> CacheResult<MultiplexedConnection> {
        let mut slot = self.shared.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self.client.get_multiplexed_async_connection().await?;
        log::info!("Redis cache connected");
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Drops the shared connection when `err` means it is no longer usable
    async fn observe<T>(&self, result: Result<T, RedisError>) -> CacheResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                if needs_reconnect(&err) && self.shared.lock().await.take().is_some() {
                    log::warn!("Redis connection lost ({}), reconnecting on next use", err);
                }
                Err(err.into())
            }
        }
    }

    #[cfg(test)]
    async fn is_connected(&self) -> bool {
        self.shared.lock().await.is_some()
    }
}

fn needs_reconnect(err: &RedisError) -> bool {
    err.is_io_error()
        || err.is_connection_dropped()
        || err.is_connection_refusal()
        || err.is_timeout()
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let result: Result<Option<Vec<u8>>, RedisError> = conn.get(self.namespaced(key)).await;
        self.observe(result).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let millis = ttl.as_millis() as u64;
        if millis == 0 {
            return Err(CacheError::InvalidTtl);
        }

        let mut conn = self.connection().await?;
        let result: Result<(), RedisError> = redis::cmd("SET")
            .arg(self.namespaced(key))
            .arg(value)
            .arg("PX")
            .arg(millis)
            .query_async(&mut conn)
            .await;
        self.observe(result).await
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let result: Result<(), RedisError> = conn.del(self.namespaced(key)).await;
        self.observe(result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisCacheStore::new("not a url", "framerate").is_err());
    }

    #[test]
    fn test_keys_are_namespaced() {
        let store = RedisCacheStore::new("redis://127.0.0.1:6379", "framerate").unwrap();
        assert_eq!(store.namespaced("tmdb:movie:1:en-US"), "framerate:tmdb:movie:1:en-US");

        let bare = RedisCacheStore::new("redis://127.0.0.1:6379", "").unwrap();
        assert_eq!(bare.namespaced("k"), "k");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error_not_a_hang() {
        // Port 1 is never a Redis server; the caller's timeout still bounds the attempt
        let store = RedisCacheStore::new("redis://127.0.0.1:1", "framerate").unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), store.get("k")).await;
        assert!(!matches!(result, Ok(Ok(_))));
        assert!(!store.is_connected().await);
    }

    #[test]
    fn test_transport_errors_trigger_reconnect() {
        let reset = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ));
        assert!(needs_reconnect(&reset));

        let wrong_type = RedisError::from((redis::ErrorKind::TypeError, "unexpected reply"));
        assert!(!needs_reconnect(&wrong_type));
    }

    #[tokio::test]
    async fn test_lost_connection_is_released() {
        let store = RedisCacheStore::new("redis://127.0.0.1:1", "framerate").unwrap();

        let dropped: Result<(), RedisError> = Err(RedisError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "broken pipe",
        )));
        assert!(store.observe(dropped).await.is_err());
        assert!(!store.is_connected().await);

        let ok: Result<u8, RedisError> = Ok(7);
        assert_eq!(store.observe(ok).await.unwrap(), 7);
    }
}
