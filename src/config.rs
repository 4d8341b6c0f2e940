//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional): how long an operation waits for a
///   connection before failing with `StorageUnavailable`, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is loaded first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric setting
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let config: Config =
            envy::from_iter(vars(&[("DATABASE_URL", "postgres://localhost/catalog")])).unwrap();

        assert_eq!(config.database_url, "postgres://localhost/catalog");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout_secs, 5);
    }

    #[rstest]
    fn explicit_pool_settings_override_defaults() {
        let config: Config = envy::from_iter(vars(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.db_acquire_timeout_secs, 2);
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        let result = envy::from_iter::<_, Config>(vars(&[("DB_MAX_CONNECTIONS", "3")]));
        assert!(result.is_err());
    }
}
