// src/services/movie_sync_service.rs
//
// Movie synchronization and interaction orchestration
//
// PRINCIPLES:
// - A local movie row exists only once catalog metadata was fetched
// - Materialization relies on the repository upsert, never on a lock
// - Validation happens before any I/O
// - Reads never materialize
//
// No connection or lock is held across the catalog call.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    parse_release_year, validate_movie, validate_review_content, DomainError, Movie, NewMovie,
    Rating, TmdbId, TrackUpdate, UserId, UserInteraction,
};
use crate::error::AppResult;
use crate::integrations::tmdb::{MovieCatalog, TmdbMovieDetails};
use crate::repositories::{InteractionRepository, MovieRepository};

pub struct MovieSyncService {
    movie_repo: Arc<dyn MovieRepository>,
    interaction_repo: Arc<dyn InteractionRepository>,
    catalog: Arc<dyn MovieCatalog>,
}

impl MovieSyncService {
    pub fn new(
        movie_repo: Arc<dyn MovieRepository>,
        interaction_repo: Arc<dyn InteractionRepository>,
        catalog: Arc<dyn MovieCatalog>,
    ) -> Self {
        Self {
            movie_repo,
            interaction_repo,
            catalog,
        }
    }

    /// Return the local row for a catalog id, fetching and materializing it
    /// on first reference.
    ///
    /// Concurrent first references may both fetch; the upsert makes them
    /// converge on one row and both return the same local id. On fetch
    /// failure nothing is written.
    pub async fn ensure_local_movie(&self, tmdb_id: TmdbId) -> AppResult<Movie> {
        check_tmdb_id(tmdb_id)?;

        if let Some(movie) = self.movie_repo.get_by_tmdb_id(tmdb_id)? {
            return Ok(movie);
        }

        let details = self.catalog.movie_details(tmdb_id, None).await?;
        let movie = self.store_details(tmdb_id, &details)?;

        log::info!(
            "Materialized movie tmdb_id={} as local id {} ({})",
            tmdb_id,
            movie.id,
            movie.title
        );
        Ok(movie)
    }

    /// Re-fetch from the catalog, bypassing the cached detail entry, and
    /// overwrite the descriptive fields. The local id is preserved.
    pub async fn refresh_movie(&self, tmdb_id: TmdbId) -> AppResult<Movie> {
        check_tmdb_id(tmdb_id)?;

        self.catalog.invalidate_movie(tmdb_id, None).await;
        let details = self.catalog.movie_details(tmdb_id, None).await?;
        let movie = self.store_details(tmdb_id, &details)?;

        log::info!("Refreshed movie tmdb_id={} (local id {})", tmdb_id, movie.id);
        Ok(movie)
    }

    /// Local lookup only
    pub fn get_local_movie(&self, tmdb_id: TmdbId) -> AppResult<Option<Movie>> {
        self.movie_repo.get_by_tmdb_id(tmdb_id)
    }

    /// Apply whichever track fields were supplied; omitted ones keep their
    /// stored value.
    pub async fn track(&self, user_id: UserId, tmdb_id: TmdbId, update: TrackUpdate) -> AppResult<()> {
        let movie = self.ensure_local_movie(tmdb_id).await?;
        self.interaction_repo.upsert_track(user_id, movie.id, &update)
    }

    /// Rating a movie marks it watched, dated now, without touching the
    /// favorite or watchlist flags.
    pub async fn rate(&self, user_id: UserId, tmdb_id: TmdbId, rating: f64) -> AppResult<()> {
        let rating = Rating::new(rating)?;
        let movie = self.ensure_local_movie(tmdb_id).await?;

        self.interaction_repo.upsert_rate(user_id, movie.id, rating)?;
        self.interaction_repo.mark_watched(user_id, movie.id, Utc::now())
    }

    pub async fn review(
        &self,
        user_id: UserId,
        tmdb_id: TmdbId,
        content: &str,
        is_spoiler: bool,
    ) -> AppResult<()> {
        validate_review_content(content)?;
        let movie = self.ensure_local_movie(tmdb_id).await?;

        self.interaction_repo
            .upsert_review(user_id, movie.id, content, is_spoiler)
    }

    /// All-defaults when the movie was never materialized; no catalog call.
    pub fn get_interaction(&self, user_id: UserId, tmdb_id: TmdbId) -> AppResult<UserInteraction> {
        match self.movie_repo.get_by_tmdb_id(tmdb_id)? {
            Some(movie) => self.interaction_repo.get_user_interaction(user_id, movie.id),
            None => Ok(UserInteraction::default()),
        }
    }

    fn store_details(&self, tmdb_id: TmdbId, details: &TmdbMovieDetails) -> AppResult<Movie> {
        if details.id != tmdb_id {
            log::warn!(
                "Catalog returned id {} for requested id {}; keeping requested id",
                details.id,
                tmdb_id
            );
        }

        let new_movie = movie_from_details(tmdb_id, details);
        validate_movie(&new_movie)?;

        self.movie_repo.upsert(&new_movie)
    }
}

fn check_tmdb_id(tmdb_id: TmdbId) -> Result<(), DomainError> {
    if tmdb_id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "catalog id must be positive, got {}",
            tmdb_id
        )));
    }
    Ok(())
}

/// Map a catalog payload onto the local movie shape.
///
/// Image fields keep the catalog path; full URLs are built at the boundary.
pub fn movie_from_details(tmdb_id: TmdbId, details: &TmdbMovieDetails) -> NewMovie {
    NewMovie {
        tmdb_id,
        title: details.title.clone(),
        original_title: details.original_title.clone(),
        release_year: parse_release_year(&details.release_date),
        duration_minutes: details.runtime,
        synopsis: details.overview.clone(),
        poster_url: details.poster_path.clone().unwrap_or_default(),
        backdrop_url: details.backdrop_path.clone().unwrap_or_default(),
        language: details.original_language.clone(),
    }
}
