use super::entity::NewMovie;
use crate::domain::{DomainError, DomainResult};

/// Validates the invariants a movie payload must hold before it is upserted
pub fn validate_movie(movie: &NewMovie) -> DomainResult<()> {
    if movie.tmdb_id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Catalog id must be positive, got {}",
            movie.tmdb_id
        )));
    }
    if movie.release_year < 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Release year cannot be negative, got {}",
            movie.release_year
        )));
    }
    Ok(())
}

/// Movie invariants:
///
/// 1. At most one row per catalog id
/// 2. Local id is assigned once and never reassigned
/// 3. Descriptive fields are overwritable by re-sync
/// 4. Rows are never deleted by the sync path
/// 5. Titles are not validated: upstream payload quality is outside our control
