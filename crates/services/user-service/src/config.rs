//! User service configuration.

use std::env;

use common::DatabaseConfig;
use domain::DEFAULT_PAGE_SIZE;

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Backing database
    pub database: DatabaseConfig,
    /// Page size for `list` when none is given
    pub default_page_size: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("USER_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: env_parse("USER_SERVICE_DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: env_parse("USER_SERVICE_DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                sql_logging: env_parse("USER_SERVICE_SQL_LOGGING").unwrap_or(defaults.sql_logging),
            },
            default_page_size: env_parse("USER_SERVICE_DEFAULT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
