use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, MovieId, UserId};

/// Per-user watch state for a movie, keyed by (user_id, movie_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub is_watched: bool,
    pub is_favorite: bool,
    pub is_watchlist: bool,
    /// Present only if it was ever set
    pub watched_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a track.
///
/// `None` means "leave the stored value alone". Zero values (`false`) are
/// legitimate and are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackUpdate {
    pub is_watched: Option<bool>,
    pub is_favorite: Option<bool>,
    pub is_watchlist: Option<bool>,
    pub watched_date: Option<DateTime<Utc>>,
}

impl TrackUpdate {
    pub fn is_empty(&self) -> bool {
        self.is_watched.is_none()
            && self.is_favorite.is_none()
            && self.is_watchlist.is_none()
            && self.watched_date.is_none()
    }
}

/// A star rating in [0, 5], quantized to half-star steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidRating(value));
        }
        if (value * 2.0).fract() != 0.0 {
            return Err(DomainError::InvalidRating(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Per-user numeric rating, one per (user_id, movie_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-user free-text review, one per (user_id, movie_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub content: String,
    pub is_spoiler: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot of everything a user did with one movie.
///
/// Missing rows fold into the defaults: not watched, no favorite,
/// not on the watchlist, no rating, no review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInteraction {
    pub is_watched: bool,
    pub is_favorite: bool,
    pub is_watchlist: bool,
    pub watched_date: Option<DateTime<Utc>>,
    pub rating: Option<Rating>,
    pub review: Option<ReviewSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSnapshot {
    pub content: String,
    pub is_spoiler: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserInteraction {
    pub fn from_parts(track: Option<Track>, rate: Option<Rate>, review: Option<Review>) -> Self {
        let mut interaction = Self::default();

        if let Some(track) = track {
            interaction.is_watched = track.is_watched;
            interaction.is_favorite = track.is_favorite;
            interaction.is_watchlist = track.is_watchlist;
            interaction.watched_date = track.watched_date;
        }

        interaction.rating = rate.map(|r| r.rating);

        interaction.review = review.map(|r| ReviewSnapshot {
            content: r.content,
            is_spoiler: r.is_spoiler,
            created_at: r.created_at,
            updated_at: r.updated_at,
        });

        interaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_steps_are_valid() {
        for value in [0.0, 0.5, 1.0, 2.5, 4.5, 5.0] {
            assert!(Rating::new(value).is_ok(), "{} should be valid", value);
        }
    }

    #[test]
    fn test_off_step_and_out_of_range_are_rejected() {
        for value in [4.7, 0.25, -0.5, 5.5, f64::NAN, f64::INFINITY] {
            assert!(Rating::new(value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_rating_deserialization_validates() {
        let ok: Rating = serde_json::from_str("3.5").unwrap();
        assert_eq!(ok.value(), 3.5);
        assert!(serde_json::from_str::<Rating>("3.3").is_err());
    }

    #[test]
    fn test_empty_track_update() {
        assert!(TrackUpdate::default().is_empty());
        let update = TrackUpdate {
            is_favorite: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_interaction_defaults_without_rows() {
        let interaction = UserInteraction::from_parts(None, None, None);
        assert_eq!(interaction, UserInteraction::default());
        assert!(!interaction.is_watched);
        assert!(interaction.rating.is_none());
        assert!(interaction.review.is_none());
    }
}
