//! Brewery search - dynamic predicate query builder.
//!
//! Translates a `SearchCriteria` into a single parameterized query:
//!
//! ```sql
//! SELECT <brewery columns> FROM brewery
//! WHERE city = $1 AND state = $2      -- one condition per supplied filter
//! ```
//!
//! Conditions are appended incrementally and each value is bound in the same
//! step as its placeholder, so the placeholder numbering and the bound
//! arguments can never drift apart. Values are never written into the SQL text.

use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        brewery::{BREWERY_COLUMNS, Brewery},
        search::SearchCriteria,
    },
};

/// Build the search statement for `criteria`.
///
/// With no supplied filters the statement has no `WHERE` clause and returns
/// every brewery.
pub(crate) fn build_search_query(criteria: &SearchCriteria) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {BREWERY_COLUMNS} FROM brewery"));

    // Placeholder and bound value are pushed together so $n matches the argument order
    let mut separator = " WHERE ";
    for (column, value) in criteria.filters() {
        query
            .push(separator)
            .push(column)
            .push(" = ")
            .push_bind(value.to_owned());
        separator = " AND ";
    }

    query
}

/// Search breweries by optional city, state and zipcode.
///
/// A brewery matches when every supplied filter equals the corresponding
/// column exactly (case-sensitive). Blank filters are ignored.
///
/// # Errors
///
/// Any failure (unreachable database, pool timeout, statement error) is
/// reported as `AppError::StorageUnavailable`. Rows are collected with
/// `fetch_all`, so a failure never yields a partial result.
#[tracing::instrument(
    skip(pool),
    fields(filters = criteria.filters().count(), full_scan = criteria.is_unconstrained())
)]
pub async fn search(pool: &DbPool, criteria: &SearchCriteria) -> Result<Vec<Brewery>, AppError> {
    let mut query = build_search_query(criteria);

    // fetch_all either returns every row or fails as a whole
    let breweries = query
        .build_query_as::<Brewery>()
        .fetch_all(pool)
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "brewery search failed");
            AppError::StorageUnavailable(err)
        })?;

    tracing::debug!(matches = breweries.len(), "brewery search complete");

    Ok(breweries)
}
