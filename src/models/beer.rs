//! Beer data models.
//!
//! This module defines:
//! - `Beer`: Database entity representing a beer brewed by one brewery
//! - `NewBeer`: Request body for adding a beer to a brewery

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Column list shared by every statement that returns a `Beer`.
pub(crate) const BEER_COLUMNS: &str =
    "beer_id, brewery_id, beer_name, beer_style, abv, beer_description, beer_image";

/// `BEER_COLUMNS` with every column prefixed by a table alias, for joins.
pub(crate) fn qualified_beer_columns(alias: &str) -> String {
    BEER_COLUMNS
        .split(", ")
        .map(|column| format!("{alias}.{column}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Represents a beer record from the database.
///
/// # Database Table
///
/// Maps to the `beer` table. Each beer belongs to one brewery and is removed
/// with it (`ON DELETE CASCADE`), together with its reviews and favorites.
/// Only the brewery's founder may add or remove beers.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct Beer {
    pub beer_id: i32,

    /// Owning brewery
    pub brewery_id: i32,

    pub beer_name: String,

    /// e.g. "IPA", "Stout"
    pub beer_style: Option<String>,

    /// Alcohol by volume, in percent
    pub abv: Option<f64>,

    pub beer_description: Option<String>,

    pub beer_image: Option<String>,
}

/// Request body for adding a beer.
///
/// ```json
/// {
///   "brewery_id": 3,
///   "beer_name": "Flatirons IPA",
///   "beer_style": "IPA",
///   "abv": 6.8
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NewBeer {
    pub brewery_id: i32,
    pub beer_name: String,
    #[serde(default)]
    pub beer_style: Option<String>,
    #[serde(default)]
    pub abv: Option<f64>,
    #[serde(default)]
    pub beer_description: Option<String>,
    #[serde(default)]
    pub beer_image: Option<String>,
}

impl NewBeer {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.beer_name.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "beer_name must not be blank".to_string(),
            ));
        }
        if let Some(abv) = self.abv {
            if !(0.0..=100.0).contains(&abv) {
                return Err(AppError::InvalidRequest(
                    "abv must be between 0 and 100".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn new_beer(name: &str, abv: Option<f64>) -> NewBeer {
        NewBeer {
            brewery_id: 1,
            beer_name: name.to_string(),
            beer_style: None,
            abv,
            beer_description: None,
            beer_image: None,
        }
    }

    #[rstest]
    #[case::no_abv(None)]
    #[case::zero(Some(0.0))]
    #[case::typical(Some(6.8))]
    fn valid_beers_are_accepted(#[case] abv: Option<f64>) {
        assert!(new_beer("Flatirons IPA", abv).validate().is_ok());
    }

    #[rstest]
    #[case::blank_name("  ", None)]
    #[case::negative_abv("Flatirons IPA", Some(-1.0))]
    #[case::abv_over_100("Flatirons IPA", Some(100.5))]
    #[case::nan_abv("Flatirons IPA", Some(f64::NAN))]
    fn invalid_beers_are_rejected(#[case] name: &str, #[case] abv: Option<f64>) {
        assert!(matches!(
            new_beer(name, abv).validate(),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[rstest]
    fn optional_fields_default_to_none() {
        let beer: NewBeer =
            serde_json::from_str(r#"{"brewery_id": 3, "beer_name": "Flatirons IPA"}"#).unwrap();

        assert!(beer.abv.is_none());
        assert!(beer.beer_style.is_none());
    }

    #[rstest]
    fn qualified_columns_prefix_every_beer_column() {
        assert_eq!(
            qualified_beer_columns("be"),
            "be.beer_id, be.brewery_id, be.beer_name, be.beer_style, be.abv, \
             be.beer_description, be.beer_image"
        );
    }
}
