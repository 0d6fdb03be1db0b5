// src/repositories/movie_repository.rs
//
// Movie persistence
//
// The only write path is an upsert keyed on tmdb_id. There is no
// exists-then-insert anywhere: two callers materializing the same catalog
// movie both succeed and converge on one row.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use super::{format_timestamp, parse_timestamp};
use crate::db::ConnectionPool;
use crate::domain::{Movie, MovieId, NewMovie, TmdbId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait MovieRepository: Send + Sync {
    fn get_by_tmdb_id(&self, tmdb_id: TmdbId) -> AppResult<Option<Movie>>;
    fn get_by_id(&self, id: MovieId) -> AppResult<Option<Movie>>;

    /// Insert, or overwrite the descriptive columns of the existing row.
    /// Returns the stored row re-read by `tmdb_id`, so the local id is the
    /// authoritative one even on the conflict path.
    fn upsert(&self, movie: &NewMovie) -> AppResult<Movie>;
}

const MOVIE_COLUMNS: &str = "id, tmdb_id, title, original_title, release_year, duration_minutes,
     synopsis, poster_url, backdrop_url, language, created_at, updated_at";

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Movie {
            id: row.get("id")?,
            tmdb_id: row.get("tmdb_id")?,
            title: row.get("title")?,
            original_title: row.get("original_title")?,
            release_year: row.get("release_year")?,
            duration_minutes: row.get("duration_minutes")?,
            synopsis: row.get("synopsis")?,
            poster_url: row.get("poster_url")?,
            backdrop_url: row.get("backdrop_url")?,
            language: row.get("language")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn find_by_tmdb_id(conn: &Connection, tmdb_id: TmdbId) -> AppResult<Option<Movie>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM movies WHERE tmdb_id = ?1",
            MOVIE_COLUMNS
        ))?;

        match stmt.query_row(params![tmdb_id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

impl MovieRepository for SqliteMovieRepository {
    fn get_by_tmdb_id(&self, tmdb_id: TmdbId) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;
        Self::find_by_tmdb_id(&conn, tmdb_id)
    }

    fn get_by_id(&self, id: MovieId) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLUMNS))?;

        match stmt.query_row(params![id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn upsert(&self, movie: &NewMovie) -> AppResult<Movie> {
        let conn = self.pool.get()?;
        let now = format_timestamp(&Utc::now());

        conn.execute(
            "INSERT INTO movies (
                tmdb_id, title, original_title, release_year, duration_minutes,
                synopsis, poster_url, backdrop_url, language, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            ON CONFLICT(tmdb_id) DO UPDATE SET
                title = excluded.title,
                original_title = excluded.original_title,
                release_year = excluded.release_year,
                duration_minutes = excluded.duration_minutes,
                synopsis = excluded.synopsis,
                poster_url = excluded.poster_url,
                backdrop_url = excluded.backdrop_url,
                language = excluded.language,
                updated_at = excluded.updated_at",
            params![
                movie.tmdb_id,
                movie.title,
                movie.original_title,
                movie.release_year,
                movie.duration_minutes,
                movie.synopsis,
                movie.poster_url,
                movie.backdrop_url,
                movie.language,
                now,
            ],
        )?;

        log::debug!("Upserted movie tmdb_id={}", movie.tmdb_id);

        Self::find_by_tmdb_id(&conn, movie.tmdb_id)?.ok_or(AppError::NotFound)
    }
}
