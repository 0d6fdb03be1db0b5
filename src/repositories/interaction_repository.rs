// src/repositories/interaction_repository.rs
//
// Track / Rate / Review persistence
//
// CRITICAL RULES:
// - Every write is INSERT ... ON CONFLICT(user_id, movie_id) DO UPDATE
// - A track upsert only overwrites the columns the caller supplied
// - Reads never create rows

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use super::{format_timestamp, parse_timestamp};
use crate::db::ConnectionPool;
use crate::domain::{MovieId, Rate, Rating, Review, Track, TrackUpdate, UserId, UserInteraction};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait InteractionRepository: Send + Sync {
    /// Partial upsert: `None` fields keep their stored value (or the column
    /// default on first insert).
    fn upsert_track(&self, user_id: UserId, movie_id: MovieId, update: &TrackUpdate)
        -> AppResult<()>;

    /// Sets `is_watched` and `watched_date` unconditionally, leaving the
    /// favorite and watchlist flags alone.
    fn mark_watched(&self, user_id: UserId, movie_id: MovieId, at: DateTime<Utc>)
        -> AppResult<()>;

    fn upsert_rate(&self, user_id: UserId, movie_id: MovieId, rating: Rating) -> AppResult<()>;

    fn upsert_review(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        content: &str,
        is_spoiler: bool,
    ) -> AppResult<()>;

    fn get_track(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Track>>;
    fn get_rate(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Rate>>;
    fn get_review(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Review>>;

    /// Union of the three rows, missing ones folded into defaults
    fn get_user_interaction(&self, user_id: UserId, movie_id: MovieId)
        -> AppResult<UserInteraction>;
}

pub struct SqliteInteractionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteInteractionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_track(row: &Row) -> Result<Track, rusqlite::Error> {
        let watched_date: Option<String> = row.get("watched_date")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Track {
            user_id: row.get("user_id")?,
            movie_id: row.get("movie_id")?,
            is_watched: row.get("is_watched")?,
            is_favorite: row.get("is_favorite")?,
            is_watchlist: row.get("is_watchlist")?,
            watched_date: watched_date.as_deref().map(parse_timestamp).transpose()?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_rate(row: &Row) -> Result<Rate, rusqlite::Error> {
        let value: f64 = row.get("rating")?;
        let rating =
            Rating::new(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Rate {
            user_id: row.get("user_id")?,
            movie_id: row.get("movie_id")?,
            rating,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn row_to_review(row: &Row) -> Result<Review, rusqlite::Error> {
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Review {
            user_id: row.get("user_id")?,
            movie_id: row.get("movie_id")?,
            content: row.get("content")?,
            is_spoiler: row.get("is_spoiler")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }

    fn find_track(conn: &Connection, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Track>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, movie_id, is_watched, is_favorite, is_watchlist,
                    watched_date, created_at, updated_at
             FROM tracks WHERE user_id = ?1 AND movie_id = ?2",
        )?;

        match stmt.query_row(params![user_id, movie_id], Self::row_to_track) {
            Ok(track) => Ok(Some(track)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_rate(conn: &Connection, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Rate>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, movie_id, rating, created_at, updated_at
             FROM rates WHERE user_id = ?1 AND movie_id = ?2",
        )?;

        match stmt.query_row(params![user_id, movie_id], Self::row_to_rate) {
            Ok(rate) => Ok(Some(rate)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_review(
        conn: &Connection,
        user_id: UserId,
        movie_id: MovieId,
    ) -> AppResult<Option<Review>> {
        let mut stmt = conn.prepare(
            "SELECT user_id, movie_id, content, is_spoiler, created_at, updated_at
             FROM reviews WHERE user_id = ?1 AND movie_id = ?2",
        )?;

        match stmt.query_row(params![user_id, movie_id], Self::row_to_review) {
            Ok(review) => Ok(Some(review)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

impl InteractionRepository for SqliteInteractionRepository {
    fn upsert_track(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        update: &TrackUpdate,
    ) -> AppResult<()> {
        let conn = self.pool.get()?;
        let now = format_timestamp(&Utc::now());

        conn.execute(
            "INSERT INTO tracks (
                user_id, movie_id, is_watched, is_favorite, is_watchlist,
                watched_date, created_at, updated_at
            ) VALUES (?1, ?2, COALESCE(?3, 0), COALESCE(?4, 0), COALESCE(?5, 0), ?6, ?7, ?7)
            ON CONFLICT(user_id, movie_id) DO UPDATE SET
                is_watched = COALESCE(?3, is_watched),
                is_favorite = COALESCE(?4, is_favorite),
                is_watchlist = COALESCE(?5, is_watchlist),
                watched_date = COALESCE(?6, watched_date),
                updated_at = ?7",
            params![
                user_id,
                movie_id,
                update.is_watched,
                update.is_favorite,
                update.is_watchlist,
                update.watched_date.as_ref().map(format_timestamp),
                now,
            ],
        )?;

        log::debug!("Upserted track user={} movie={}", user_id, movie_id);
        Ok(())
    }

    fn mark_watched(&self, user_id: UserId, movie_id: MovieId, at: DateTime<Utc>) -> AppResult<()> {
        let conn = self.pool.get()?;
        let now = format_timestamp(&Utc::now());

        conn.execute(
            "INSERT INTO tracks (
                user_id, movie_id, is_watched, watched_date, created_at, updated_at
            ) VALUES (?1, ?2, 1, ?3, ?4, ?4)
            ON CONFLICT(user_id, movie_id) DO UPDATE SET
                is_watched = 1,
                watched_date = excluded.watched_date,
                updated_at = excluded.updated_at",
            params![user_id, movie_id, format_timestamp(&at), now],
        )?;

        Ok(())
    }

    fn upsert_rate(&self, user_id: UserId, movie_id: MovieId, rating: Rating) -> AppResult<()> {
        let conn = self.pool.get()?;
        let now = format_timestamp(&Utc::now());

        conn.execute(
            "INSERT INTO rates (user_id, movie_id, rating, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(user_id, movie_id) DO UPDATE SET
                rating = excluded.rating,
                updated_at = excluded.updated_at",
            params![user_id, movie_id, rating.value(), now],
        )?;

        log::debug!("Upserted rate user={} movie={} rating={}", user_id, movie_id, rating);
        Ok(())
    }

    fn upsert_review(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        content: &str,
        is_spoiler: bool,
    ) -> AppResult<()> {
        let conn = self.pool.get()?;
        let now = format_timestamp(&Utc::now());

        conn.execute(
            "INSERT INTO reviews (user_id, movie_id, content, is_spoiler, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(user_id, movie_id) DO UPDATE SET
                content = excluded.content,
                is_spoiler = excluded.is_spoiler,
                updated_at = excluded.updated_at",
            params![user_id, movie_id, content, is_spoiler, now],
        )?;

        log::debug!("Upserted review user={} movie={}", user_id, movie_id);
        Ok(())
    }

    fn get_track(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Track>> {
        let conn = self.pool.get()?;
        Self::find_track(&conn, user_id, movie_id)
    }

    fn get_rate(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Rate>> {
        let conn = self.pool.get()?;
        Self::find_rate(&conn, user_id, movie_id)
    }

    fn get_review(&self, user_id: UserId, movie_id: MovieId) -> AppResult<Option<Review>> {
        let conn = self.pool.get()?;
        Self::find_review(&conn, user_id, movie_id)
    }

    fn get_user_interaction(
        &self,
        user_id: UserId,
        movie_id: MovieId,
    ) -> AppResult<UserInteraction> {
        let conn = self.pool.get()?;

        let track = Self::find_track(&conn, user_id, movie_id)?;
        let rate = Self::find_rate(&conn, user_id, movie_id)?;
        let review = Self::find_review(&conn, user_id, movie_id)?;

        Ok(UserInteraction::from_parts(track, rate, review))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewMovie;
    use crate::repositories::{MovieRepository, SqliteMovieRepository};
    use chrono::TimeZone;

    const USER: UserId = 7;

    fn setup() -> (SqliteInteractionRepository, MovieId) {
        let pool = Arc::new(crate::db::create_memory_pool().unwrap());
        let movie = SqliteMovieRepository::new(pool.clone())
            .upsert(&NewMovie::new(27205, "Inception".to_string()))
            .unwrap();
        (SqliteInteractionRepository::new(pool), movie.id)
    }

    fn count(repo: &SqliteInteractionRepository, table: &str) -> i64 {
        let conn = repo.pool.get().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_first_track_uses_defaults_for_omitted_fields() {
        let (repo, movie_id) = setup();
        let update = TrackUpdate {
            is_favorite: Some(true),
            ..Default::default()
        };
        repo.upsert_track(USER, movie_id, &update).unwrap();

        let track = repo.get_track(USER, movie_id).unwrap().unwrap();
        assert!(track.is_favorite);
        assert!(!track.is_watched);
        assert!(!track.is_watchlist);
        assert!(track.watched_date.is_none());
    }

    #[test]
    fn test_partial_updates_preserve_other_columns() {
        let (repo, movie_id) = setup();
        let watched_on = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();

        repo.upsert_track(
            USER,
            movie_id,
            &TrackUpdate {
                is_favorite: Some(true),
                watched_date: Some(watched_on),
                ..Default::default()
            },
        )
        .unwrap();
        repo.upsert_track(
            USER,
            movie_id,
            &TrackUpdate {
                is_watched: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let track = repo.get_track(USER, movie_id).unwrap().unwrap();
        assert!(track.is_watched);
        assert!(track.is_favorite);
        assert_eq!(track.watched_date, Some(watched_on));
        assert_eq!(count(&repo, "tracks"), 1);
    }

    #[test]
    fn test_explicit_false_is_written() {
        let (repo, movie_id) = setup();
        let on = TrackUpdate {
            is_watchlist: Some(true),
            ..Default::default()
        };
        let off = TrackUpdate {
            is_watchlist: Some(false),
            ..Default::default()
        };

        repo.upsert_track(USER, movie_id, &on).unwrap();
        repo.upsert_track(USER, movie_id, &off).unwrap();

        assert!(!repo.get_track(USER, movie_id).unwrap().unwrap().is_watchlist);
    }

    #[test]
    fn test_mark_watched_keeps_flags_and_overwrites_date() {
        let (repo, movie_id) = setup();
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();

        repo.upsert_track(
            USER,
            movie_id,
            &TrackUpdate {
                is_watched: Some(false),
                is_favorite: Some(true),
                is_watchlist: Some(true),
                watched_date: Some(earlier),
            },
        )
        .unwrap();
        repo.mark_watched(USER, movie_id, later).unwrap();

        let track = repo.get_track(USER, movie_id).unwrap().unwrap();
        assert!(track.is_watched);
        assert!(track.is_favorite);
        assert!(track.is_watchlist);
        assert_eq!(track.watched_date, Some(later));
    }

    #[test]
    fn test_rerating_replaces_value() {
        let (repo, movie_id) = setup();
        repo.upsert_rate(USER, movie_id, Rating::new(3.0).unwrap()).unwrap();
        let first = repo.get_rate(USER, movie_id).unwrap().unwrap();

        repo.upsert_rate(USER, movie_id, Rating::new(4.5).unwrap()).unwrap();
        let second = repo.get_rate(USER, movie_id).unwrap().unwrap();

        assert_eq!(second.rating.value(), 4.5);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(count(&repo, "rates"), 1);
    }

    #[test]
    fn test_rereview_replaces_content_and_spoiler_flag() {
        let (repo, movie_id) = setup();
        repo.upsert_review(USER, movie_id, "Dreams within dreams", true).unwrap();
        repo.upsert_review(USER, movie_id, "Still great on rewatch", false).unwrap();

        let review = repo.get_review(USER, movie_id).unwrap().unwrap();
        assert_eq!(review.content, "Still great on rewatch");
        assert!(!review.is_spoiler);
        assert_eq!(count(&repo, "reviews"), 1);
    }

    #[test]
    fn test_interaction_without_rows_is_default() {
        let (repo, movie_id) = setup();
        let interaction = repo.get_user_interaction(USER, movie_id).unwrap();
        assert_eq!(interaction, UserInteraction::default());
    }

    #[test]
    fn test_zero_rating_row_is_reported() {
        let (repo, movie_id) = setup();
        repo.upsert_rate(USER, movie_id, Rating::new(0.0).unwrap()).unwrap();

        let interaction = repo.get_user_interaction(USER, movie_id).unwrap();
        assert_eq!(interaction.rating.map(Rating::value), Some(0.0));
    }

    #[test]
    fn test_interaction_is_scoped_per_user() {
        let (repo, movie_id) = setup();
        repo.upsert_review(USER, movie_id, "Mine", false).unwrap();

        let other = repo.get_user_interaction(USER + 1, movie_id).unwrap();
        assert!(other.review.is_none());
    }

    #[test]
    fn test_unknown_movie_violates_foreign_key() {
        let (repo, _) = setup();
        let result = repo.upsert_rate(USER, 9999, Rating::new(4.0).unwrap());
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
