// src/lib.rs
// FrameRate Sync - movie metadata synchronization and interaction tracking
//
// Architecture:
// - Local-first: the relational store is the source of truth
// - Catalog reads go through a cache-aside layer that is advisory only
// - Movies are materialized lazily, on the first interaction that needs them
// - Explicit: no implicit behavior, no magic
// - Application Layer: request boundary (commands + DTOs)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    parse_release_year,
    validate_movie,
    validate_review_content,
    // Movie
    Movie,
    MovieId,
    NewMovie,
    // Interaction
    Rate,
    Rating,
    Review,
    ReviewSnapshot,
    TmdbId,
    Track,
    TrackUpdate,
    UserId,
    UserInteraction,
    // Statistics
    UserMovieStats,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Cache
// ============================================================================

pub use cache::{
    CacheError, CacheService, CacheStore, InMemoryCacheStore, NoopCacheStore, RedisCacheStore,
};

// ============================================================================
// PUBLIC API - Catalog
// ============================================================================

pub use integrations::tmdb::{CatalogError, MovieCatalog, TmdbClient, TmdbConfig};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    InteractionRepository, MovieRepository, SqliteInteractionRepository, SqliteMovieRepository,
    SqliteStatisticsRepository, StatisticsRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{MovieSyncService, StatisticsService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
