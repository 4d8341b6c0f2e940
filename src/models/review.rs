//! Beer review data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Lowest and highest accepted `beer_rating`.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Represents a review record from the database.
///
/// # Database Table
///
/// Maps to the `beer_review` table. Reviews are removed together with their
/// beer (`ON DELETE CASCADE`).
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct BeerReview {
    pub beer_review_id: i32,

    pub beer_id: i32,

    /// User who posted the review and the only one allowed to delete it
    pub reviewer_id: i32,

    /// Rating from 1 to 5 (enforced by CHECK constraint as well)
    pub beer_rating: i32,

    pub beer_review: String,

    /// Set by the database on insert
    pub date_posted: DateTime<Utc>,
}

/// Request body for posting a review.
///
/// ```json
/// {
///   "beer_id": 12,
///   "beer_rating": 4,
///   "beer_review": "Crisp, a little too much citra."
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NewBeerReview {
    pub beer_id: i32,
    pub beer_rating: i32,
    #[serde(default)]
    pub beer_review: String,
}

impl NewBeerReview {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.beer_rating) {
            return Err(AppError::InvalidRequest(format!(
                "beer_rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        Ok(())
    }
}
