//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Redis configuration
    #[serde(default)]
    pub redis: RedisConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Enable database (if false, use in-memory storage)
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            enabled: true,
        }
    }
}

impl DatabaseConfig {
    /// In-memory SQLite configuration, one connection so every query sees the same database
    pub fn in_memory_sqlite() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
            enabled: true,
        }
    }
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis URL
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Enable Redis (if false, only the in-process cache is used)
    #[serde(default)]
    pub enabled: bool,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            enabled: false,
            connection_timeout: default_connection_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert!(config.url.starts_with("sqlite://"));
        assert_eq!(config.max_connections, 10);
        assert!(config.enabled);
    }

    #[test]
    fn test_database_config_deserialization_defaults() {
        let config: DatabaseConfig = serde_yaml::from_str("url: postgres://db/billing").unwrap();
        assert_eq!(config.url, "postgres://db/billing");
        assert_eq!(config.connection_timeout, 5);
        assert!(config.enabled);
    }

    #[test]
    fn test_redis_disabled_by_default() {
        let config = RedisConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.url, "redis://localhost:6379");
    }
}
