// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod interaction;
pub mod movie;
pub mod statistics;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{parse_release_year, validate_movie, Movie, NewMovie};

// Interaction Domain
pub use interaction::{
    validate_review_content, Rate, Rating, Review, ReviewSnapshot, Track, TrackUpdate,
    UserInteraction,
};

// Statistics Domain (Derived Data)
pub use statistics::UserMovieStats;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Verified user identifier delivered by the request layer
pub type UserId = i64;

/// Local surrogate movie identifier
pub type MovieId = i64;

/// External catalog movie identifier
pub type TmdbId = i64;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} must be between 0 and 5 in increments of 0.5")]
    InvalidRating(f64),

    #[error("Review content cannot be empty")]
    EmptyReview,
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
