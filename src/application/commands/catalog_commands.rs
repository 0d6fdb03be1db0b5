// src/application/commands/catalog_commands.rs
//
// Catalog browsing. Pure pass-through to the cached catalog client;
// nothing here touches the local store.

use super::CommandResult;
use crate::application::{dto::SearchMoviesDto, error_handling::ToErrorResponse, state::AppState};
use crate::error::AppError;
use crate::integrations::tmdb::{
    TmdbCredits, TmdbPersonCredits, TmdbPersonDetails, TmdbSearchResponse, TmdbVideoResponse,
};

pub async fn search_movies(
    state: &AppState,
    dto: SearchMoviesDto,
) -> CommandResult<TmdbSearchResponse> {
    state
        .catalog
        .search_movies(&dto.query, dto.page.unwrap_or(1), dto.language.as_deref())
        .await
        .map_err(AppError::from)
        .to_error_response()
}

pub async fn popular_movies(
    state: &AppState,
    page: i32,
    language: Option<&str>,
) -> CommandResult<TmdbSearchResponse> {
    state
        .catalog
        .popular_movies(page, language)
        .await
        .map_err(AppError::from)
        .to_error_response()
}

pub async fn movie_credits(state: &AppState, tmdb_id: i64) -> CommandResult<TmdbCredits> {
    state
        .catalog
        .movie_credits(tmdb_id)
        .await
        .map_err(AppError::from)
        .to_error_response()
}

pub async fn movie_videos(state: &AppState, tmdb_id: i64) -> CommandResult<TmdbVideoResponse> {
    state
        .catalog
        .movie_videos(tmdb_id)
        .await
        .map_err(AppError::from)
        .to_error_response()
}

pub async fn person_details(
    state: &AppState,
    person_id: i64,
    language: Option<&str>,
) -> CommandResult<TmdbPersonDetails> {
    state
        .catalog
        .person_details(person_id, language)
        .await
        .map_err(AppError::from)
        .to_error_response()
}

pub async fn person_movie_credits(
    state: &AppState,
    person_id: i64,
    language: Option<&str>,
) -> CommandResult<TmdbPersonCredits> {
    state
        .catalog
        .person_movie_credits(person_id, language)
        .await
        .map_err(AppError::from)
        .to_error_response()
}
