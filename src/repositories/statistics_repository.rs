// src/repositories/statistics_repository.rs
//
// Read-only aggregate queries over interaction rows.

use std::collections::BTreeMap;
use std::sync::Arc;

use rusqlite::params;

use super::SqliteMovieRepository;
use crate::db::ConnectionPool;
use crate::domain::{Movie, UserId};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait StatisticsRepository: Send + Sync {
    fn count_watched(&self, user_id: UserId) -> AppResult<i64>;
    fn count_watched_in_year(&self, user_id: UserId, year: i32) -> AppResult<i64>;
    fn count_reviews(&self, user_id: UserId) -> AppResult<i64>;

    /// Rating formatted with one decimal ("4.5") -> movie count
    fn rating_distribution(&self, user_id: UserId) -> AppResult<BTreeMap<String, i64>>;

    fn favorite_movies(&self, user_id: UserId, limit: u32) -> AppResult<Vec<Movie>>;

    /// Most recent `watched_date` first; tracks without a date are skipped
    fn recent_watched(&self, user_id: UserId, limit: u32) -> AppResult<Vec<Movie>>;
}

pub struct SqliteStatisticsRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteStatisticsRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn count(&self, sql: &str, params: impl rusqlite::Params) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let n: i64 = conn.query_row(sql, params, |row| row.get(0))?;
        Ok(n)
    }

    fn movies(&self, sql: &str, user_id: UserId, limit: u32) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;

        let movies = stmt
            .query_map(params![user_id, limit], SqliteMovieRepository::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }
}

impl StatisticsRepository for SqliteStatisticsRepository {
    fn count_watched(&self, user_id: UserId) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM tracks WHERE user_id = ?1 AND is_watched = 1",
            params![user_id],
        )
    }

    fn count_watched_in_year(&self, user_id: UserId, year: i32) -> AppResult<i64> {
        // watched_date is RFC 3339 text, so the year is its first four characters
        self.count(
            "SELECT COUNT(*) FROM tracks
             WHERE user_id = ?1 AND is_watched = 1 AND substr(watched_date, 1, 4) = ?2",
            params![user_id, format!("{:04}", year)],
        )
    }

    fn count_reviews(&self, user_id: UserId) -> AppResult<i64> {
        self.count(
            "SELECT COUNT(*) FROM reviews WHERE user_id = ?1",
            params![user_id],
        )
    }

    fn rating_distribution(&self, user_id: UserId) -> AppResult<BTreeMap<String, i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT rating, COUNT(*) FROM rates WHERE user_id = ?1 GROUP BY rating",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let rating: f64 = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((format!("{:.1}", rating), count))
        })?;

        let mut distribution = BTreeMap::new();
        for row in rows {
            let (rating, count) = row?;
            distribution.insert(rating, count);
        }
        Ok(distribution)
    }

    fn favorite_movies(&self, user_id: UserId, limit: u32) -> AppResult<Vec<Movie>> {
        self.movies(
            "SELECT m.id, m.tmdb_id, m.title, m.original_title, m.release_year,
                    m.duration_minutes, m.synopsis, m.poster_url, m.backdrop_url,
                    m.language, m.created_at, m.updated_at
             FROM tracks t JOIN movies m ON m.id = t.movie_id
             WHERE t.user_id = ?1 AND t.is_favorite = 1
             ORDER BY t.updated_at DESC
             LIMIT ?2",
            user_id,
            limit,
        )
    }

    fn recent_watched(&self, user_id: UserId, limit: u32) -> AppResult<Vec<Movie>> {
        self.movies(
            "SELECT m.id, m.tmdb_id, m.title, m.original_title, m.release_year,
                    m.duration_minutes, m.synopsis, m.poster_url, m.backdrop_url,
                    m.language, m.created_at, m.updated_at
             FROM tracks t JOIN movies m ON m.id = t.movie_id
             WHERE t.user_id = ?1 AND t.is_watched = 1 AND t.watched_date IS NOT NULL
             ORDER BY t.watched_date DESC
             LIMIT ?2",
            user_id,
            limit,
        )
    }
}
