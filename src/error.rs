//! Error types for catalog operations.
//!
//! Every service function returns `Result<T, AppError>`. Storage failures are
//! split into constraint violations (`DataIntegrity`) and everything else
//! (`StorageUnavailable`).

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Storage Errors**: connection or query failures from sqlx
/// - **Integrity Errors**: unique, foreign-key or check constraint violations
/// - **Resource Errors**: requested rows not found
/// - **Ownership Errors**: the requesting user does not own the record
/// - **Validation Errors**: caller-supplied values rejected before storage
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The database could not be reached or the statement failed to execute.
    ///
    /// This is the only error a brewery search can produce.
    #[error("Unable to connect to server or database")]
    StorageUnavailable(#[source] sqlx::Error),

    /// A statement violated a schema constraint (e.g. unknown founder id).
    #[error("Data integrity violation")]
    DataIntegrity(#[source] sqlx::Error),

    #[error("Brewery not found")]
    BreweryNotFound,

    #[error("Beer not found")]
    BeerNotFound,

    #[error("Review not found")]
    ReviewNotFound,

    /// Only the founder may update or delete a brewery, or add and remove its beers.
    #[error("Only the brewery founder may modify this brewery")]
    NotFounder,

    /// Only the reviewer may delete a review.
    #[error("Only the reviewer may modify this review")]
    NotReviewer,

    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl AppError {
    /// Stable snake_case code, used as a structured field in log events.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::DataIntegrity(_) => "data_integrity",
            AppError::BreweryNotFound => "brewery_not_found",
            AppError::BeerNotFound => "beer_not_found",
            AppError::ReviewNotFound => "review_not_found",
            AppError::NotFounder => "not_founder",
            AppError::NotReviewer => "not_reviewer",
            AppError::InvalidRequest(_) => "invalid_request",
        }
    }
}

/// Classify a sqlx error.
///
/// Constraint violations reported by PostgreSQL become `DataIntegrity`;
/// connection, pool, protocol and decode failures become `StorageUnavailable`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let violates_constraint = matches!(
            &err,
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.is_foreign_key_violation() || db.is_check_violation()
        );

        if violates_constraint {
            AppError::DataIntegrity(err)
        } else {
            AppError::StorageUnavailable(err)
        }
    }
}
