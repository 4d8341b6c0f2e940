//! Business logic services.
//!
//! Services hold the SQL for each catalog operation, the ownership checks and
//! the mapping of storage failures onto `AppError`.

pub mod beer_service;
pub mod brewery_search;
pub mod brewery_service;
pub mod review_service;
