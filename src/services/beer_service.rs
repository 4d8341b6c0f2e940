//! Beer service - a brewery's beers and per-user saved beers.
//!
//! Beers belong to their brewery's founder: adding or removing one runs the
//! same locked founder check as a brewery update.

use crate::{
    db::DbPool,
    error::AppError,
    models::beer::{BEER_COLUMNS, Beer, NewBeer, qualified_beer_columns},
    services::brewery_service::ensure_founder,
};

/// Beers brewed by one brewery, in insertion order.
///
/// An unknown brewery simply has no beers.
pub async fn beers_for_brewery(pool: &DbPool, brewery_id: i32) -> Result<Vec<Beer>, AppError> {
    let beers = sqlx::query_as::<_, Beer>(&format!(
        "SELECT {BEER_COLUMNS} FROM beer WHERE brewery_id = $1 ORDER BY beer_id"
    ))
    .bind(brewery_id)
    .fetch_all(pool)
    .await?;

    Ok(beers)
}

/// Get a beer by id.
///
/// # Errors
///
/// - `BeerNotFound`: no row with this id
/// - `StorageUnavailable`: database error
pub async fn get_beer_by_id(pool: &DbPool, beer_id: i32) -> Result<Beer, AppError> {
    let beer = sqlx::query_as::<_, Beer>(&format!(
        "SELECT {BEER_COLUMNS} FROM beer WHERE beer_id = $1"
    ))
    .bind(beer_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::BeerNotFound)?;

    Ok(beer)
}

/// Add a beer to a brewery. Only the brewery's founder may do this.
///
/// # Errors
///
/// - `InvalidRequest`: blank name or abv outside 0..=100
/// - `BreweryNotFound`: `new_beer.brewery_id` does not exist
/// - `NotFounder`: `requester_id` is not the brewery's founder
/// - `StorageUnavailable`: database error
#[tracing::instrument(skip(pool, new_beer), fields(brewery_id = new_beer.brewery_id))]
pub async fn create_beer(
    pool: &DbPool,
    requester_id: i32,
    new_beer: NewBeer,
) -> Result<Beer, AppError> {
    new_beer.validate()?;

    // Start db transaction
    let mut tx = pool.begin().await?;

    // Lock the brewery so it cannot be deleted under the insert
    if let Err(err) = ensure_founder(&mut tx, requester_id, new_beer.brewery_id).await {
        tx.rollback().await?;
        return Err(err);
    }

    let beer = sqlx::query_as::<_, Beer>(&format!(
        r#"
        INSERT INTO beer (brewery_id, beer_name, beer_style, abv, beer_description, beer_image)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {BEER_COLUMNS}
        "#
    ))
    .bind(new_beer.brewery_id)
    .bind(new_beer.beer_name)
    .bind(new_beer.beer_style)
    .bind(new_beer.abv)
    .bind(new_beer.beer_description)
    .bind(new_beer.beer_image)
    .fetch_one(&mut *tx)
    .await?;

    // Commit atomically
    tx.commit().await?;

    tracing::info!(beer_id = beer.beer_id, "beer created");

    Ok(beer)
}

/// Delete a beer. Only the founder of the owning brewery may do this.
///
/// Reviews and favorites of the beer go with it through `ON DELETE CASCADE`.
///
/// # Errors
///
/// - `BeerNotFound`: no beer with this id
/// - `NotFounder`: `requester_id` is not the brewery's founder
/// - `StorageUnavailable`: database error
#[tracing::instrument(skip(pool))]
pub async fn delete_beer(pool: &DbPool, requester_id: i32, beer_id: i32) -> Result<(), AppError> {
    // Start db transaction
    let mut tx = pool.begin().await?;

    let brewery_id: Option<i32> =
        sqlx::query_scalar("SELECT brewery_id FROM beer WHERE beer_id = $1")
            .bind(beer_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(brewery_id) = brewery_id else {
        tx.rollback().await?;
        return Err(AppError::BeerNotFound);
    };

    // Brewery lock before beer rows, the same order delete_brewery uses
    if let Err(err) = ensure_founder(&mut tx, requester_id, brewery_id).await {
        tx.rollback().await?;
        return Err(err);
    }

    // Re-checks the owner in case the beer vanished after the first read
    let deleted = sqlx::query("DELETE FROM beer WHERE beer_id = $1 AND brewery_id = $2")
        .bind(beer_id)
        .bind(brewery_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        tx.rollback().await?;
        return Err(AppError::BeerNotFound);
    }

    // Commit atomically
    tx.commit().await?;

    tracing::info!("beer deleted");

    Ok(())
}

/// Beers the user has saved, in the order they were saved.
pub async fn saved_beers(pool: &DbPool, user_id: i32) -> Result<Vec<Beer>, AppError> {
    let columns = qualified_beer_columns("b");

    let beers = sqlx::query_as::<_, Beer>(&format!(
        r#"
        SELECT {columns}
        FROM favorite_beer f
        JOIN beer b ON b.beer_id = f.beer_id
        WHERE f.user_id = $1
        ORDER BY f.saved_at
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(beers)
}

/// Add a beer to the user's saved list. Saving twice is a no-op.
///
/// # Errors
///
/// - `BeerNotFound`: no beer with this id
/// - `DataIntegrity`: `user_id` does not reference an existing user
pub async fn save_beer(pool: &DbPool, user_id: i32, beer_id: i32) -> Result<(), AppError> {
    // Inserts nothing when the beer is missing or already saved
    let inserted = sqlx::query(
        r#"
        INSERT INTO favorite_beer (user_id, beer_id)
        SELECT $1, beer_id FROM beer WHERE beer_id = $2
        ON CONFLICT (user_id, beer_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(beer_id)
    .execute(pool)
    .await?
    .rows_affected();

    if inserted == 0 {
        // Tell "already saved" apart from "no such beer"
        let already_saved: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorite_beer WHERE user_id = $1 AND beer_id = $2)",
        )
        .bind(user_id)
        .bind(beer_id)
        .fetch_one(pool)
        .await?;

        if !already_saved {
            return Err(AppError::BeerNotFound);
        }
    }

    Ok(())
}

/// Remove a beer from the user's saved list. Removing an unsaved beer is a no-op.
pub async fn unsave_beer(pool: &DbPool, user_id: i32, beer_id: i32) -> Result<(), AppError> {
    sqlx::query("DELETE FROM favorite_beer WHERE user_id = $1 AND beer_id = $2")
        .bind(user_id)
        .bind(beer_id)
        .execute(pool)
        .await?;

    Ok(())
}
