//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod app;
pub mod auth;
pub mod cache;
pub mod logging;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use auth::*;
pub use cache::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_base_path() -> String {
    "/billing-reports".to_string()
}

pub fn default_database_url() -> String {
    "sqlite://data/billing-reports.db?mode=rwc".to_string()
}

pub fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_jwt_expiration() -> u64 {
    86400 // 24 hours
}

pub fn default_admin_roles() -> Vec<String> {
    vec!["Admin".to_string()]
}

pub fn default_allowed_roles() -> Vec<String> {
    vec![
        "Finance".to_string(),
        "Sales".to_string(),
        "Admin".to_string(),
    ]
}

pub fn default_allowed_permissions() -> Vec<String> {
    vec!["View".to_string(), "Not view".to_string()]
}

pub fn default_statistics_ttl() -> u64 {
    300
}

pub fn default_cache_max_entries() -> u64 {
    1000
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
