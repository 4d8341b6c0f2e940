//! Brewery service - lookups, founder-guarded mutations and saved breweries.
//!
//! # Ownership
//!
//! Update and delete lock the brewery row (`FOR UPDATE`) inside a database
//! transaction, compare `founder_id` with the requesting user and only then
//! write. A non-founder gets `AppError::NotFounder` and nothing changes.

use sqlx::{Postgres, Transaction};

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        brewery::{BREWERY_COLUMNS, Brewery, NewBrewery, qualified_brewery_columns},
        search::SearchCriteria,
    },
    services::brewery_search,
};

/// Get a brewery by id.
///
/// # Errors
///
/// - `BreweryNotFound`: no row with this id
/// - `StorageUnavailable`: database error
pub async fn get_brewery_by_id(pool: &DbPool, brewery_id: i32) -> Result<Brewery, AppError> {
    let brewery = sqlx::query_as::<_, Brewery>(&format!(
        "SELECT {BREWERY_COLUMNS} FROM brewery WHERE brewery_id = $1"
    ))
    .bind(brewery_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::BreweryNotFound)?;

    Ok(brewery)
}

/// List every brewery. Same as a search with no filters.
pub async fn list_breweries(pool: &DbPool) -> Result<Vec<Brewery>, AppError> {
    brewery_search::search(pool, &SearchCriteria::default()).await
}

/// Create a brewery owned by `founder_id`.
///
/// # Errors
///
/// - `InvalidRequest`: blank brewery name
/// - `DataIntegrity`: `founder_id` does not reference an existing user
/// - `StorageUnavailable`: database error
#[tracing::instrument(skip(pool, new_brewery), fields(name = %new_brewery.brewery_name))]
pub async fn create_brewery(
    pool: &DbPool,
    founder_id: i32,
    new_brewery: NewBrewery,
) -> Result<Brewery, AppError> {
    new_brewery.validate()?;

    let brewery = sqlx::query_as::<_, Brewery>(&format!(
        r#"
        INSERT INTO brewery (
            brewery_name, street_address, city, state, zip_code,
            date_est, phone_number, about_us, website, logo_image, founder_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {BREWERY_COLUMNS}
        "#
    ))
    .bind(new_brewery.brewery_name)
    .bind(new_brewery.street_address)
    .bind(new_brewery.city)
    .bind(new_brewery.state)
    .bind(new_brewery.zip_code)
    .bind(new_brewery.date_est)
    .bind(new_brewery.phone_number)
    .bind(new_brewery.about_us)
    .bind(new_brewery.website)
    .bind(new_brewery.logo_image)
    .bind(founder_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(brewery_id = brewery.brewery_id, "brewery created");

    Ok(brewery)
}

/// Replace a brewery's attributes. Only the founder may do this.
///
/// The stored `founder_id` is kept; ownership cannot be transferred here.
///
/// # Errors
///
/// - `InvalidRequest`: blank brewery name
/// - `BreweryNotFound`: no row with this id
/// - `NotFounder`: `requester_id` is not the founder
/// - `StorageUnavailable` / `DataIntegrity`: database error
#[tracing::instrument(skip(pool, update))]
pub async fn update_brewery(
    pool: &DbPool,
    requester_id: i32,
    brewery_id: i32,
    update: NewBrewery,
) -> Result<Brewery, AppError> {
    update.validate()?;

    // Start db transaction
    let mut tx = pool.begin().await?;

    // Lock the brewery row and verify ownership before writing
    if let Err(err) = ensure_founder(&mut tx, requester_id, brewery_id).await {
        tx.rollback().await?;
        return Err(err);
    }

    // founder_id is never part of the SET list

    let brewery = sqlx::query_as::<_, Brewery>(&format!(
        r#"
        UPDATE brewery
        SET brewery_name = $1,
            street_address = $2,
            city = $3,
            state = $4,
            zip_code = $5,
            date_est = $6,
            phone_number = $7,
            about_us = $8,
            website = $9,
            logo_image = $10
        WHERE brewery_id = $11
        RETURNING {BREWERY_COLUMNS}
        "#
    ))
    .bind(update.brewery_name)
    .bind(update.street_address)
    .bind(update.city)
    .bind(update.state)
    .bind(update.zip_code)
    .bind(update.date_est)
    .bind(update.phone_number)
    .bind(update.about_us)
    .bind(update.website)
    .bind(update.logo_image)
    .bind(brewery_id)
    .fetch_one(&mut *tx)
    .await?;

    // Commit atomically
    tx.commit().await?;

    tracing::info!("brewery updated");

    Ok(brewery)
}

/// Delete a brewery and every saved-brewery reference to it.
///
/// Beers and their reviews go with it through `ON DELETE CASCADE`.
///
/// # Errors
///
/// - `BreweryNotFound`: no row with this id
/// - `NotFounder`: `requester_id` is not the founder
/// - `StorageUnavailable`: database error
#[tracing::instrument(skip(pool))]
pub async fn delete_brewery(
    pool: &DbPool,
    requester_id: i32,
    brewery_id: i32,
) -> Result<(), AppError> {
    // Start db transaction
    let mut tx = pool.begin().await?;

    // Lock the brewery row and verify ownership
    if let Err(err) = ensure_founder(&mut tx, requester_id, brewery_id).await {
        tx.rollback().await?;
        return Err(err);
    }

    // Favorites first, they reference the brewery without a cascade
    sqlx::query("DELETE FROM favorite_brewery WHERE brewery_id = $1")
        .bind(brewery_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM brewery WHERE brewery_id = $1")
        .bind(brewery_id)
        .execute(&mut *tx)
        .await?;

    // Commit ALL changes atomically
    tx.commit().await?;

    tracing::info!("brewery deleted");

    Ok(())
}

/// Breweries the user has saved, in the order they were saved.
pub async fn saved_breweries(pool: &DbPool, user_id: i32) -> Result<Vec<Brewery>, AppError> {
    let columns = qualified_brewery_columns("b");

    // One JOIN instead of a lookup per favorite
    let breweries = sqlx::query_as::<_, Brewery>(&format!(
        r#"
        SELECT {columns}
        FROM favorite_brewery f
        JOIN brewery b ON b.brewery_id = f.brewery_id
        WHERE f.user_id = $1
        ORDER BY f.saved_at
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(breweries)
}

/// Add a brewery to the user's saved list. Saving twice is a no-op.
///
/// The existence check and the insert are one statement, so a brewery deleted
/// concurrently is reported as `BreweryNotFound`.
///
/// # Errors
///
/// - `BreweryNotFound`: no brewery with this id
/// - `DataIntegrity`: `user_id` does not reference an existing user
pub async fn save_brewery(pool: &DbPool, user_id: i32, brewery_id: i32) -> Result<(), AppError> {
    // Inserts nothing when the brewery is missing or already saved
    let inserted = sqlx::query(
        r#"
        INSERT INTO favorite_brewery (user_id, brewery_id)
        SELECT $1, brewery_id FROM brewery WHERE brewery_id = $2
        ON CONFLICT (user_id, brewery_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(brewery_id)
    .execute(pool)
    .await?
    .rows_affected();

    if inserted == 0 {
        // Tell "already saved" apart from "no such brewery"
        let already_saved: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorite_brewery WHERE user_id = $1 AND brewery_id = $2)",
        )
        .bind(user_id)
        .bind(brewery_id)
        .fetch_one(pool)
        .await?;

        if !already_saved {
            return Err(AppError::BreweryNotFound);
        }
    }

    Ok(())
}

/// Remove a brewery from the user's saved list. Removing an unsaved brewery is a no-op.
pub async fn unsave_brewery(pool: &DbPool, user_id: i32, brewery_id: i32) -> Result<(), AppError> {
    sqlx::query("DELETE FROM favorite_brewery WHERE user_id = $1 AND brewery_id = $2")
        .bind(user_id)
        .bind(brewery_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Lock the brewery row and check that `requester_id` founded it.
///
/// Shared with the beer service: a brewery's beers belong to its founder.
pub(crate) async fn ensure_founder(
    tx: &mut Transaction<'_, Postgres>,
    requester_id: i32,
    brewery_id: i32,
) -> Result<(), AppError> {
    // FOR UPDATE holds the row until the caller commits or rolls back
    let founder_id: i32 =
        sqlx::query_scalar("SELECT founder_id FROM brewery WHERE brewery_id = $1 FOR UPDATE")
            .bind(brewery_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(AppError::BreweryNotFound)?;

    if founder_id != requester_id {
        tracing::warn!(
            brewery_id,
            requester_id,
            code = AppError::NotFounder.code(),
            "ownership check failed"
        );
        return Err(AppError::NotFounder);
    }

    Ok(())
}
