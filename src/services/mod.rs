// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod movie_sync_service;
pub mod statistics_service;


pub use movie_sync_service::{movie_from_details, MovieSyncService};
pub use statistics_service::StatisticsService;
