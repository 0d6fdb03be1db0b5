pub mod entity;
pub mod invariants;

pub use entity::{Rate, Rating, Review, ReviewSnapshot, Track, TrackUpdate, UserInteraction};
pub use invariants::validate_review_content;
