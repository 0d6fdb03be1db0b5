// src/error/types.rs
use crate::cache::CacheError;
use crate::domain::DomainError;
use crate::integrations::tmdb::CatalogError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Catalog sync failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Catalog sync failures may succeed on a later attempt; persistence
    /// failures are not retried by the core.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Catalog(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Caller-input errors, mapped to a client-error response by the request layer.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Domain(_) | AppError::Catalog(CatalogError::InvalidRequest(_))
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

// Cache failures are downgraded to misses inside `CacheService`; this
// conversion only exists for bootstrap code that builds a store eagerly.
impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Config(format!("Cache store unavailable: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
