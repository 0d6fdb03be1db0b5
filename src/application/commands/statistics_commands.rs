// src/application/commands/statistics_commands.rs

use super::CommandResult;
use crate::application::{dto::UserStatsDto, error_handling::ToErrorResponse, state::AppState};
use crate::domain::UserId;

/// Profile statistics for a user
pub async fn get_user_stats(state: &AppState, user_id: UserId) -> CommandResult<UserStatsDto> {
    let stats = state
        .statistics_service
        .user_stats(user_id)
        .to_error_response()?;

    Ok(UserStatsDto::from(stats).with_image_urls(&state.catalog))
}
