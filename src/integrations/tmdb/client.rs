// src/integrations/tmdb/client.rs
//
// TMDB API client with cache-aside reads.
//
// TTL POLICY:
// - Listings (search, popular): short, they churn with the catalog
// - Single entities (details, credits, videos, people): long

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::images::{build_image_url, ImageSize};
use super::types::{
    TmdbCredits, TmdbMovieDetails, TmdbPersonCredits, TmdbPersonDetails, TmdbSearchResponse,
    TmdbVideoResponse,
};
use super::{CatalogError, MovieCatalog};
use crate::cache::CacheService;
use crate::domain::TmdbId;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub default_language: String,
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub listing_ttl: Duration,
    pub entity_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            listing_ttl: Duration::from_secs(15 * 60),
            entity_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

pub struct TmdbClient {
    config: TmdbConfig,
    http_client: Client,
    cache: CacheService,
    policy: CachePolicy,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig, cache: CacheService) -> Result<Self, CatalogError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            cache,
            policy: CachePolicy::default(),
        })
    }

    /// Every call goes upstream
    pub fn without_cache(config: TmdbConfig) -> Result<Self, CatalogError> {
        Self::new(config, CacheService::disabled())
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: i32,
        language: Option<&str>,
    ) -> Result<TmdbSearchResponse, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }
        let page = normalize_page(page);
        let language = self.language(language);

        let key = cache_key("search", json!([query, page, language]));
        self.cached_get(
            &key,
            self.policy.listing_ttl,
            "/search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("language", language.to_string()),
            ],
        )
        .await
    }

    pub async fn popular_movies(
        &self,
        page: i32,
        language: Option<&str>,
    ) -> Result<TmdbSearchResponse, CatalogError> {
        let page = normalize_page(page);
        let language = self.language(language);

        let key = cache_key("popular", json!([page, language]));
        self.cached_get(
            &key,
            self.policy.listing_ttl,
            "/movie/popular",
            &[("page", page.to_string()), ("language", language.to_string())],
        )
        .await
    }

    /// Details with credits appended in the same round trip
    pub async fn movie_details(
        &self,
        tmdb_id: TmdbId,
        language: Option<&str>,
    ) -> Result<TmdbMovieDetails, CatalogError> {
        let language = self.language(language);

        self.cached_get(
            &movie_key(tmdb_id, language),
            self.policy.entity_ttl,
            &format!("/movie/{}", tmdb_id),
            &[
                ("language", language.to_string()),
                ("append_to_response", "credits".to_string()),
            ],
        )
        .await
    }

    pub async fn movie_credits(&self, tmdb_id: TmdbId) -> Result<TmdbCredits, CatalogError> {
        self.cached_get(
            &cache_key("credits", json!([tmdb_id])),
            self.policy.entity_ttl,
            &format!("/movie/{}/credits", tmdb_id),
            &[],
        )
        .await
    }

    pub async fn movie_videos(&self, tmdb_id: TmdbId) -> Result<TmdbVideoResponse, CatalogError> {
        self.cached_get(
            &cache_key("videos", json!([tmdb_id])),
            self.policy.entity_ttl,
            &format!("/movie/{}/videos", tmdb_id),
            &[],
        )
        .await
    }

    pub async fn person_details(
        &self,
        person_id: i64,
        language: Option<&str>,
    ) -> Result<TmdbPersonDetails, CatalogError> {
        let language = self.language(language);

        self.cached_get(
            &cache_key("person", json!([person_id, language])),
            self.policy.entity_ttl,
            &format!("/person/{}", person_id),
            &[("language", language.to_string())],
        )
        .await
    }

    pub async fn person_movie_credits(
        &self,
        person_id: i64,
        language: Option<&str>,
    ) -> Result<TmdbPersonCredits, CatalogError> {
        let language = self.language(language);

        self.cached_get(
            &cache_key("person_credits", json!([person_id, language])),
            self.policy.entity_ttl,
            &format!("/person/{}/movie_credits", person_id),
            &[("language", language.to_string())],
        )
        .await
    }

    pub async fn invalidate_movie(&self, tmdb_id: TmdbId, language: Option<&str>) {
        let language = self.language(language);
        self.cache.delete(&movie_key(tmdb_id, language)).await;
    }

    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        build_image_url(&self.config.image_base_url, path, size)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    /// Missing or blank language resolves to the configured default
    fn language<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        match language.map(str::trim) {
            Some(lang) if !lang.is_empty() => lang,
            _ => &self.config.default_language,
        }
    }

    async fn cached_get<T>(
        &self,
        key: &str,
        ttl: Duration,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(hit) = self.cache.get_json::<T>(key).await {
            return Ok(hit);
        }

        let value: T = self.fetch(path, params).await?;
        self.cache.set_json(key, &value, ttl).await;
        Ok(value)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Catalog returned {} for {}", status, path);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(CatalogError::Decode)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn movie_details(
        &self,
        tmdb_id: TmdbId,
        language: Option<&str>,
    ) -> Result<TmdbMovieDetails, CatalogError> {
        TmdbClient::movie_details(self, tmdb_id, language).await
    }

    async fn invalidate_movie(&self, tmdb_id: TmdbId, language: Option<&str>) {
        TmdbClient::invalidate_movie(self, tmdb_id, language).await
    }
}

fn movie_key(tmdb_id: TmdbId, language: &str) -> String {
    cache_key("movie", json!([tmdb_id, language]))
}

/// `tmdb:{kind}:{params}` with the normalized parameters as a JSON array.
/// Free-text values are JSON-quoted, so distinct requests never share a key.
fn cache_key(kind: &str, params: Value) -> String {
    format!("tmdb:{}:{}", kind, params)
}

fn normalize_page(page: i32) -> i32 {
    page.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_key_format() {
        assert_eq!(movie_key(27205, "en-US"), r#"tmdb:movie:[27205,"en-US"]"#);
    }

    #[test]
    fn test_separators_in_values_do_not_collide() {
        let a = cache_key("search", json!(["a", 1, "2:en-US"]));
        let b = cache_key("search", json!(["a:1", 2, "en-US"]));
        assert_ne!(a, b);

        let quoted = cache_key("search", json!([r#"x","y"#, 1, "en-US"]));
        let split = cache_key("search", json!(["x", "y", 1, "en-US"]));
        assert_ne!(quoted, split);
    }
}
