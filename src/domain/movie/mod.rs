pub mod entity;
pub mod invariants;

pub use entity::{parse_release_year, Movie, NewMovie};
pub use invariants::validate_movie;
