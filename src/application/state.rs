// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::integrations::tmdb::TmdbClient;
use crate::repositories::{
    SqliteInteractionRepository, SqliteMovieRepository, SqliteStatisticsRepository,
};
use crate::services::{MovieSyncService, StatisticsService};

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across requests.
pub struct AppState {
    pub catalog: Arc<TmdbClient>,
    pub sync_service: Arc<MovieSyncService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Wire the SQLite repositories and services over one pool
    pub fn new(pool: Arc<ConnectionPool>, catalog: Arc<TmdbClient>) -> Self {
        let movie_repo = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let interaction_repo = Arc::new(SqliteInteractionRepository::new(pool.clone()));
        let statistics_repo = Arc::new(SqliteStatisticsRepository::new(pool));

        let sync_service = Arc::new(MovieSyncService::new(
            movie_repo,
            interaction_repo,
            catalog.clone(),
        ));
        let statistics_service = Arc::new(StatisticsService::new(statistics_repo));

        Self {
            catalog,
            sync_service,
            statistics_service,
        }
    }
}
