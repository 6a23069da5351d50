//! Read cache configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Cache settings for read-mostly endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable caching of device statistics
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Time-to-live of cached device statistics in seconds
    #[serde(default = "default_statistics_ttl")]
    pub statistics_ttl: u64,
    /// Maximum entries held by the in-process cache
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            statistics_ttl: default_statistics_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}
