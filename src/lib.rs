//! Brewery catalog - data-access and service layer for a brewery-review backend.
//!
//! # Architecture
//!
//! - **Database**: PostgreSQL with sqlx (async queries, migrations)
//! - **Search**: optional city/state/zipcode filters compiled into one
//!   parameterized conjunctive query (`services::brewery_search`)
//! - **Ownership**: only a brewery's founder may update or delete it; only a
//!   review's author may delete it
//!
//! Every operation takes the connection pool explicitly. Authentication and
//! HTTP routing live in the surrounding application, which passes the
//! requesting user's id into the service functions.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
