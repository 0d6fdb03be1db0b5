use crate::domain::{DomainError, DomainResult};

/// Review content must contain something other than whitespace
pub fn validate_review_content(content: &str) -> DomainResult<()> {
    if content.trim().is_empty() {
        return Err(DomainError::EmptyReview);
    }
    Ok(())
}

/// Interaction invariants:
///
/// 1. Exactly one track, rate and review per (user, movie)
/// 2. Re-rating and re-reviewing replace the prior row
/// 3. Rating implies watched: rating sets is_watched and watched_date
/// 4. Rating never clears favorite or watchlist flags
/// 5. Ratings live in [0, 5] in half-star steps (enforced by `Rating`)
/// 6. Partial track updates never overwrite omitted fields
