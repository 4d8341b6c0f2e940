//! Brewery data models.
//!
//! This module defines:
//! - `Brewery`: Database entity representing a brewery
//! - `NewBrewery`: Writable attributes used by create and update

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column list shared by every statement that returns a `Brewery`.
pub(crate) const BREWERY_COLUMNS: &str = "brewery_id, brewery_name, street_address, city, state, \
     zip_code, date_est, phone_number, about_us, website, logo_image, founder_id";

/// `BREWERY_COLUMNS` with every column prefixed by a table alias, for joins.
pub(crate) fn qualified_brewery_columns(alias: &str) -> String {
    BREWERY_COLUMNS
        .split(", ")
        .map(|column| format!("{alias}.{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Represents a brewery record from the database.
///
/// # Database Table
///
/// Maps to the `brewery` table. Each brewery:
/// - Has a storage-assigned `brewery_id`
/// - Belongs to exactly one founder (`founder_id`, FK to `app_user`)
///
/// Only the founder may update or delete the row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Brewery {
    /// Unique identifier assigned on insert
    pub brewery_id: i32,

    pub brewery_name: String,

    pub street_address: String,

    pub city: String,

    pub state: String,

    pub zip_code: String,

    /// Founding date
    ///
    /// NULL in the database maps to `None`; there is no sentinel date.
    pub date_est: Option<NaiveDateTime>,

    pub phone_number: Option<String>,

    /// Free-text description
    pub about_us: Option<String>,

    pub website: Option<String>,

    /// Reference to the logo image (URL or asset key)
    pub logo_image: Option<String>,

    /// User who created the brewery and the only one allowed to mutate it
    pub founder_id: i32,
}

/// Writable brewery attributes.
///
/// # JSON Example
///
/// ```json
/// {
///   "brewery_name": "Mile High Ales",
///   "street_address": "1 Blake St",
///   "city": "Denver",
///   "state": "CO",
///   "zip_code": "80202",
///   "date_est": "2011-05-01T00:00:00",
///   "website": "https://milehighales.example"
/// }
/// ```
///
/// There is no `founder_id` field: creation uses the requesting user and
/// updates keep the stored founder.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBrewery {
    pub brewery_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub date_est: Option<NaiveDateTime>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub about_us: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_image: Option<String>,
}

impl NewBrewery {
    /// Reject attributes that would create an unusable record.
    pub(crate) fn validate(&self) -> Result<(), crate::error::AppError> {
        if self.brewery_name.trim().is_empty() {
            return Err(crate::error::AppError::InvalidRequest(
                "brewery_name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
