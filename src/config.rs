// src/config.rs
//
// Process configuration, read once at startup from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TIMEOUT;
use crate::db::default_database_path;
use crate::error::{AppError, AppResult};
use crate::integrations::tmdb::TmdbConfig;

pub const DEFAULT_CACHE_PREFIX: &str = "framerate";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,

    /// `None` runs with the cache disabled
    pub redis_url: Option<String>,
    pub cache_prefix: String,
    pub cache_timeout: Duration,

    pub database_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get("TMDB_API_KEY")
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))?;

        let defaults = TmdbConfig::default();
        let tmdb = TmdbConfig {
            api_key,
            base_url: get("TMDB_BASE_URL").unwrap_or(defaults.base_url),
            image_base_url: get("TMDB_IMAGE_BASE_URL").unwrap_or(defaults.image_base_url),
            default_language: get("TMDB_LANGUAGE").unwrap_or(defaults.default_language),
            timeout: match get("TMDB_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(parse_number("TMDB_TIMEOUT_SECS", &raw)?),
                None => defaults.timeout,
            },
        };

        let cache_timeout = match get("CACHE_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number("CACHE_TIMEOUT_MS", &raw)?),
            None => DEFAULT_CACHE_TIMEOUT,
        };

        let database_path = match get("DATABASE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        Ok(Self {
            tmdb,
            redis_url: get("REDIS_URL"),
            cache_prefix: get("CACHE_PREFIX").unwrap_or_else(|| DEFAULT_CACHE_PREFIX.to_string()),
            cache_timeout,
            database_path,
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got {:?}", key, raw)))
}
