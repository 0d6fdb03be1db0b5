// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are boundary-friendly representations
// - Request DTOs carry explicit optionality: an absent field is `None`,
//   never a zero value
// - Response DTOs are built FROM domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Movie, TrackUpdate, UserInteraction, UserMovieStats};
use crate::integrations::tmdb::{ImageSize, TmdbClient};

// ============================================================================
// REQUEST DTOs
// ============================================================================

/// Every field is optional; omitted fields leave stored values untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackMovieDto {
    pub is_watched: Option<bool>,
    pub is_favorite: Option<bool>,
    pub is_watchlist: Option<bool>,
    pub watched_date: Option<DateTime<Utc>>,
}

impl TrackMovieDto {
    pub fn to_update(&self) -> TrackUpdate {
        TrackUpdate {
            is_watched: self.is_watched,
            is_favorite: self.is_favorite,
            is_watchlist: self.is_watchlist,
            watched_date: self.watched_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateMovieDto {
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewMovieDto {
    pub content: String,
    #[serde(default)]
    pub is_spoiler: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMoviesDto {
    pub query: String,
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub language: Option<String>,
}

// ============================================================================
// RESPONSE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub tmdb_id: i64,
    pub title: String,
    pub original_title: String,
    pub release_year: i32,
    pub duration_minutes: i32,
    pub synopsis: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

impl MovieDto {
    /// Resolve stored image paths against the catalog image CDN
    pub fn with_image_urls(mut self, catalog: &TmdbClient) -> Self {
        self.poster_url = catalog.image_url(Some(&self.poster_path), ImageSize::W500);
        self.backdrop_url = catalog.image_url(Some(&self.backdrop_path), ImageSize::W780);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInteractionDto {
    pub is_watched: bool,
    pub is_favorite: bool,
    pub is_watchlist: bool,
    pub watched_date: Option<String>,
    pub user_rating: Option<f64>,
    pub user_review: Option<ReviewDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDto {
    pub content: String,
    pub is_spoiler: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatsDto {
    pub total_films: i64,
    pub movies_this_year: i64,
    pub reviews: i64,
    pub rating_distribution: std::collections::BTreeMap<String, i64>,
    pub favorites: Vec<MovieDto>,
    pub recent_activity: Vec<MovieDto>,
}

impl UserStatsDto {
    pub fn with_image_urls(mut self, catalog: &TmdbClient) -> Self {
        self.favorites = self
            .favorites
            .into_iter()
            .map(|m| m.with_image_urls(catalog))
            .collect();
        self.recent_activity = self
            .recent_activity
            .into_iter()
            .map(|m| m.with_image_urls(catalog))
            .collect();
        self
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            tmdb_id: movie.tmdb_id,
            title: movie.title,
            original_title: movie.original_title,
            release_year: movie.release_year,
            duration_minutes: movie.duration_minutes,
            synopsis: movie.synopsis,
            poster_path: movie.poster_url,
            backdrop_path: movie.backdrop_url,
            poster_url: None,
            backdrop_url: None,
            language: movie.language,
            created_at: movie.created_at.to_rfc3339(),
            updated_at: movie.updated_at.to_rfc3339(),
        }
    }
}

impl From<UserInteraction> for UserInteractionDto {
    fn from(interaction: UserInteraction) -> Self {
        Self {
            is_watched: interaction.is_watched,
            is_favorite: interaction.is_favorite,
            is_watchlist: interaction.is_watchlist,
            watched_date: interaction.watched_date.map(|d| d.to_rfc3339()),
            user_rating: interaction.rating.map(|r| r.value()),
            user_review: interaction.review.map(|r| ReviewDto {
                content: r.content,
                is_spoiler: r.is_spoiler,
                created_at: r.created_at.to_rfc3339(),
                updated_at: r.updated_at.to_rfc3339(),
            }),
        }
    }
}

impl From<UserMovieStats> for UserStatsDto {
    fn from(stats: UserMovieStats) -> Self {
        Self {
            total_films: stats.watched_count,
            movies_this_year: stats.watched_this_year,
            reviews: stats.review_count,
            rating_distribution: stats.rating_distribution,
            favorites: stats.favorite_movies.into_iter().map(MovieDto::from).collect(),
            recent_activity: stats.recent_watched.into_iter().map(MovieDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::tmdb::TmdbConfig;

    #[test]
    fn test_track_dto_distinguishes_absent_from_false() {
        let dto: TrackMovieDto = serde_json::from_str(r#"{"is_favorite": false}"#).unwrap();
        let update = dto.to_update();

        assert_eq!(update.is_favorite, Some(false));
        assert_eq!(update.is_watched, None);
        assert_eq!(update.is_watchlist, None);
        assert_eq!(update.watched_date, None);
    }

    #[test]
    fn test_empty_track_body_is_accepted() {
        let dto: TrackMovieDto = serde_json::from_str("{}").unwrap();
        assert!(dto.to_update().is_empty());
    }

    #[test]
    fn test_review_spoiler_defaults_to_false() {
        let dto: ReviewMovieDto = serde_json::from_str(r#"{"content": "Great"}"#).unwrap();
        assert!(!dto.is_spoiler);
    }

    #[test]
    fn test_movie_dto_resolves_images() {
        let now = Utc::now();
        let movie = Movie {
            id: 1,
            tmdb_id: 27205,
            title: "Inception".to_string(),
            original_title: "Inception".to_string(),
            release_year: 2010,
            duration_minutes: 148,
            synopsis: String::new(),
            poster_url: "/inception.jpg".to_string(),
            backdrop_url: String::new(),
            language: "en".to_string(),
            created_at: now,
            updated_at: now,
        };
        let catalog = TmdbClient::without_cache(TmdbConfig::default()).unwrap();

        let dto = MovieDto::from(movie).with_image_urls(&catalog);
        assert_eq!(
            dto.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/inception.jpg")
        );
        assert_eq!(dto.backdrop_url, None);
    }

    #[test]
    fn test_default_interaction_dto() {
        let dto = UserInteractionDto::from(UserInteraction::default());
        assert!(!dto.is_watched);
        assert!(dto.user_rating.is_none());
        assert!(dto.user_review.is_none());
    }
}
