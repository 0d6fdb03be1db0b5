use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MovieId, TmdbId};

/// Local copy of a movie whose canonical metadata lives in the external catalog.
///
/// A row exists only once metadata was successfully fetched at least once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Surrogate identifier assigned by the local store, never reused
    pub id: MovieId,

    /// Catalog identifier (unique, immutable once set)
    pub tmdb_id: TmdbId,

    pub title: String,
    pub original_title: String,

    /// Zero when the catalog release date is missing or malformed
    pub release_year: i32,

    pub duration_minutes: i32,
    pub synopsis: String,
    pub poster_url: String,
    pub backdrop_url: String,

    /// Original language code (e.g. "en")
    pub language: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptive payload written on materialization or re-sync.
///
/// Carries no local id: the store assigns it on first insert and keeps it
/// on every later upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovie {
    pub tmdb_id: TmdbId,
    pub title: String,
    pub original_title: String,
    pub release_year: i32,
    pub duration_minutes: i32,
    pub synopsis: String,
    pub poster_url: String,
    pub backdrop_url: String,
    pub language: String,
}

impl NewMovie {
    pub fn new(tmdb_id: TmdbId, title: String) -> Self {
        Self {
            tmdb_id,
            title,
            original_title: String::new(),
            release_year: 0,
            duration_minutes: 0,
            synopsis: String::new(),
            poster_url: String::new(),
            backdrop_url: String::new(),
            language: String::new(),
        }
    }
}

/// Extract the year from a catalog release date ("2010-07-15").
///
/// Lenient: anything that does not start with four ASCII digits yields 0
/// instead of failing the sync.
pub fn parse_release_year(release_date: &str) -> i32 {
    match release_date.get(..4) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_year() {
        assert_eq!(parse_release_year("2010-07-15"), 2010);
        assert_eq!(parse_release_year("1999"), 1999);
    }

    #[test]
    fn test_parse_release_year_is_lenient() {
        assert_eq!(parse_release_year(""), 0);
        assert_eq!(parse_release_year("20"), 0);
        assert_eq!(parse_release_year("20a0-01-01"), 0);
        assert_eq!(parse_release_year("-200-01-01"), 0);
        assert_eq!(parse_release_year("é999"), 0);
    }
}
