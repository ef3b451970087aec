//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement through `tracing`
    pub sql_logging: bool,
}

impl DatabaseConfig {
    /// Configuration for a throwaway SQLite database living in memory.
    ///
    /// Pinned to one connection: every SQLite in-memory connection is its
    /// own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            sql_logging: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://users.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            sql_logging: false,
        }
    }
}
