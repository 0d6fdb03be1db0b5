// src/integrations/tmdb/mod.rs
//
// Movie catalog integration (TMDB)
//
// ARCHITECTURE:
// - HTTP JSON client, bearer authenticated, bounded timeout
// - Every read goes through the cache-aside `CacheService`
// - Returns wire payloads; mapping to domain entities happens in services
//
// CRITICAL RULES:
// - Cache keys are computed AFTER parameter normalization
// - Only successful, decoded responses are cached
// - Never touches the relational store

pub mod client;
pub mod images;
pub mod types;


use async_trait::async_trait;
use thiserror::Error;

use crate::domain::TmdbId;

pub use client::{CachePolicy, TmdbClient, TmdbConfig};
pub use images::ImageSize;
pub use types::*;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request timed out")]
    Timeout,

    #[error("catalog request failed: {0}")]
    Request(String),

    #[error("catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode catalog response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid catalog request: {0}")]
    InvalidRequest(String),
}

impl CatalogError {
    /// Every upstream failure is a transient "sync failed"; only a request
    /// rejected before leaving the process is final.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CatalogError::InvalidRequest(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::Request(err.to_string())
        }
    }
}

/// The slice of the catalog the synchronization service depends on.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Detail lookup; `None` resolves to the configured default language
    async fn movie_details(
        &self,
        tmdb_id: TmdbId,
        language: Option<&str>,
    ) -> Result<TmdbMovieDetails, CatalogError>;

    /// Drop any cached detail entry so the next lookup goes upstream
    async fn invalidate_movie(&self, tmdb_id: TmdbId, language: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(CatalogError::Timeout.is_retryable());
        assert!(CatalogError::Request("reset".into()).is_retryable());
        assert!(CatalogError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!CatalogError::InvalidRequest("empty query".into()).is_retryable());

        let decode = serde_json::from_str::<TmdbMovie>("{").unwrap_err();
        assert!(CatalogError::Decode(decode).is_retryable());
    }
}
