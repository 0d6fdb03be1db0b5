//! Statistics invariants:
//!
//! 1. Statistics are always derived from track, rate and review rows
//! 2. Statistics never alter interaction state
//! 3. If statistics conflict with interaction rows, the rows win

pub mod entity;
pub use entity::UserMovieStats;
