//! Beer review service.

use crate::{
    db::DbPool,
    error::AppError,
    models::review::{BeerReview, NewBeerReview},
};

/// Reviews of one beer, newest first.
pub async fn reviews_for_beer(pool: &DbPool, beer_id: i32) -> Result<Vec<BeerReview>, AppError> {
    let reviews = sqlx::query_as::<_, BeerReview>(
        r#"
        SELECT beer_review_id, beer_id, reviewer_id, beer_rating, beer_review, date_posted
        FROM beer_review
        WHERE beer_id = $1
        ORDER BY date_posted DESC, beer_review_id DESC
        "#,
    )
    .bind(beer_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Post a review as `reviewer_id`.
///
/// # Errors
///
/// - `InvalidRequest`: rating outside 1..=5 (nothing is sent to the database)
/// - `DataIntegrity`: unknown beer or reviewer
/// - `StorageUnavailable`: database error
#[tracing::instrument(skip(pool, review), fields(beer_id = review.beer_id))]
pub async fn create_review(
    pool: &DbPool,
    reviewer_id: i32,
    review: NewBeerReview,
) -> Result<BeerReview, AppError> {
    // Reject bad ratings before touching the database
    review.validate()?;

    let created = sqlx::query_as::<_, BeerReview>(
        r#"
        INSERT INTO beer_review (beer_id, reviewer_id, beer_rating, beer_review)
        VALUES ($1, $2, $3, $4)
        RETURNING beer_review_id, beer_id, reviewer_id, beer_rating, beer_review, date_posted
        "#,
    )
    .bind(review.beer_id)
    .bind(reviewer_id)
    .bind(review.beer_rating)
    .bind(review.beer_review)
    .fetch_one(pool)
    .await?;

    tracing::info!(beer_review_id = created.beer_review_id, "review posted");

    Ok(created)
}

/// Delete a review. Only its reviewer may do this.
///
/// # Errors
///
/// - `ReviewNotFound`: no review with this id
/// - `NotReviewer`: `requester_id` did not post the review
#[tracing::instrument(skip(pool))]
pub async fn delete_review(
    pool: &DbPool,
    requester_id: i32,
    review_id: i32,
) -> Result<(), AppError> {
    // Start db transaction
    let mut tx = pool.begin().await?;

    // Lock the review row so the author check and the delete see the same row
    let reviewer_id: Option<i32> = sqlx::query_scalar(
        "SELECT reviewer_id FROM beer_review WHERE beer_review_id = $1 FOR UPDATE",
    )
    .bind(review_id)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = match reviewer_id {
        None => Err(AppError::ReviewNotFound),
        Some(reviewer_id) if reviewer_id != requester_id => Err(AppError::NotReviewer),
        Some(_) => Ok(()),
    };

    if let Err(err) = outcome {
        // Nothing was written, release the lock
        tx.rollback().await?;
        tracing::warn!(code = err.code(), "review delete rejected");
        return Err(err);
    }

    sqlx::query("DELETE FROM beer_review WHERE beer_review_id = $1")
        .bind(review_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
