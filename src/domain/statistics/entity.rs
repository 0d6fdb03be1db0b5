use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::movie::Movie;

/// Derived per-user statistics.
/// Never a source of truth; recomputed from interaction rows on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMovieStats {
    pub watched_count: i64,
    pub watched_this_year: i64,
    pub review_count: i64,

    /// Rating ("4.5") -> number of movies the user gave that rating
    pub rating_distribution: BTreeMap<String, i64>,

    pub favorite_movies: Vec<Movie>,

    /// Most recently watched first
    pub recent_watched: Vec<Movie>,
}

impl UserMovieStats {
    pub fn rated_count(&self) -> i64 {
        self.rating_distribution.values().sum()
    }
}
