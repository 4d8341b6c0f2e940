//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the search criteria used to filter breweries.

/// Beer model
pub mod beer;
/// Brewery model
pub mod brewery;
/// Beer review model
pub mod review;
/// Brewery search criteria
pub mod search;
