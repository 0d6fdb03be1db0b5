// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO cross-repository calls
// - Writes are upserts on the natural or composite key, never check-then-insert
// - Explicit SQL only

pub mod interaction_repository;
pub mod movie_repository;
pub mod statistics_repository;

pub use interaction_repository::{InteractionRepository, SqliteInteractionRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};
pub use statistics_repository::{SqliteStatisticsRepository, StatisticsRepository};

#[cfg(test)]
pub use interaction_repository::MockInteractionRepository;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
#[cfg(test)]
pub use statistics_repository::MockStatisticsRepository;

use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width RFC 3339 (microseconds, `Z`), so text order is time order
pub(crate) fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
