// src/services/statistics_service.rs
use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::domain::{UserId, UserMovieStats};
use crate::error::AppResult;
use crate::repositories::StatisticsRepository;

/// Length of the favorites and recently-watched lists on a profile
pub const DEFAULT_LIST_LIMIT: u32 = 4;

pub struct StatisticsService {
    statistics_repo: Arc<dyn StatisticsRepository>,
    list_limit: u32,
}

impl StatisticsService {
    pub fn new(statistics_repo: Arc<dyn StatisticsRepository>) -> Self {
        Self {
            statistics_repo,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }

    /// Recomputed from interaction rows on every call
    pub fn user_stats(&self, user_id: UserId) -> AppResult<UserMovieStats> {
        let current_year = Utc::now().year();

        Ok(UserMovieStats {
            watched_count: self.statistics_repo.count_watched(user_id)?,
            watched_this_year: self
                .statistics_repo
                .count_watched_in_year(user_id, current_year)?,
            review_count: self.statistics_repo.count_reviews(user_id)?,
            rating_distribution: self.statistics_repo.rating_distribution(user_id)?,
            favorite_movies: self.statistics_repo.favorite_movies(user_id, self.list_limit)?,
            recent_watched: self.statistics_repo.recent_watched(user_id, self.list_limit)?,
        })
    }
}
