//! Brewery catalog bootstrap.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Report the catalog size

use brewery_catalog::{config, db, services::brewery_service};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "Configuration loaded"
    );

    let pool = db::create_pool(&config).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let breweries = brewery_service::list_breweries(&pool).await?;
    tracing::info!(breweries = breweries.len(), "Brewery catalog ready");

    pool.close().await;

    Ok(())
}
