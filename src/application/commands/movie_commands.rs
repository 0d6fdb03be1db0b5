// src/application/commands/movie_commands.rs
//
// Movie Interaction Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs or an acknowledgement
// - Never contain business logic

use super::CommandResult;
use crate::application::{
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::{TmdbId, UserId};

/// Record watched / favorite / watchlist state; omitted fields are kept
pub async fn track_movie(
    state: &AppState,
    user_id: UserId,
    tmdb_id: TmdbId,
    dto: TrackMovieDto,
) -> CommandResult<()> {
    state
        .sync_service
        .track(user_id, tmdb_id, dto.to_update())
        .await
        .to_error_response()
}

/// Rate in half-star steps; also marks the movie watched
pub async fn rate_movie(
    state: &AppState,
    user_id: UserId,
    tmdb_id: TmdbId,
    dto: RateMovieDto,
) -> CommandResult<()> {
    state
        .sync_service
        .rate(user_id, tmdb_id, dto.rating)
        .await
        .to_error_response()
}

pub async fn review_movie(
    state: &AppState,
    user_id: UserId,
    tmdb_id: TmdbId,
    dto: ReviewMovieDto,
) -> CommandResult<()> {
    state
        .sync_service
        .review(user_id, tmdb_id, &dto.content, dto.is_spoiler)
        .await
        .to_error_response()
}

/// Never materializes; an unknown movie yields the all-defaults snapshot
pub async fn get_movie_interaction(
    state: &AppState,
    user_id: UserId,
    tmdb_id: TmdbId,
) -> CommandResult<UserInteractionDto> {
    let interaction = state
        .sync_service
        .get_interaction(user_id, tmdb_id)
        .to_error_response()?;

    Ok(UserInteractionDto::from(interaction))
}

/// Local movie, materialized from the catalog on first request
pub async fn get_movie(state: &AppState, tmdb_id: TmdbId) -> CommandResult<MovieDto> {
    let movie = state
        .sync_service
        .ensure_local_movie(tmdb_id)
        .await
        .to_error_response()?;

    Ok(MovieDto::from(movie).with_image_urls(&state.catalog))
}

pub async fn refresh_movie(state: &AppState, tmdb_id: TmdbId) -> CommandResult<MovieDto> {
    let movie = state
        .sync_service
        .refresh_movie(tmdb_id)
        .await
        .to_error_response()?;

    Ok(MovieDto::from(movie).with_image_urls(&state.catalog))
}
