//! Device statistics with read-through caching
//!
//! Reads go to the in-process cache, then Redis, then the inventory. Entries
//! expire after the configured TTL and are dropped when a device is registered
//! through [`DeviceStatisticsService::register_device`]. Writes made directly
//! to the inventory show up once the TTL runs out.

use crate::config::CacheConfig;
use crate::core::models::{Device, DeviceStatistics};
use crate::storage::DeviceInventory;
use crate::storage::redis::RedisPool;
use crate::utils::error::Result;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const STATISTICS_KEY: &str = "billing-reports:device-statistics";

/// CSV header of the statistics export
pub const CSV_HEADER: &str = "Tag,Total Devices";

/// File name offered for the statistics export
pub const CSV_FILENAME: &str = "device-statistics.csv";

/// Device statistics service
pub struct DeviceStatisticsService {
    inventory: Arc<dyn DeviceInventory>,
    redis: Arc<RedisPool>,
    local: Option<Cache<&'static str, DeviceStatistics>>,
    ttl: Duration,
}

impl DeviceStatisticsService {
    pub fn new(
        inventory: Arc<dyn DeviceInventory>,
        redis: Arc<RedisPool>,
        config: &CacheConfig,
    ) -> Self {
        let ttl = Duration::from_secs(config.statistics_ttl);
        let local = config.enabled.then(|| {
            Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(ttl)
                .build()
        });
        Self {
            inventory,
            redis,
            local,
            ttl,
        }
    }

    /// Device counts per tag, ordered by tag
    pub async fn statistics(&self) -> Result<DeviceStatistics> {
        let Some(local) = &self.local else {
            return self.load().await;
        };

        if let Some(cached) = local.get(&STATISTICS_KEY).await {
            debug!("Device statistics served from local cache");
            return Ok(cached);
        }

        if let Some(cached) = self.from_redis().await {
            local.insert(STATISTICS_KEY, cached.clone()).await;
            return Ok(cached);
        }

        let statistics = self.load().await?;
        local.insert(STATISTICS_KEY, statistics.clone()).await;
        self.to_redis(&statistics).await;
        Ok(statistics)
    }

    /// Statistics rendered as CSV
    pub async fn export_csv(&self) -> Result<String> {
        Ok(render_csv(&self.statistics().await?))
    }

    /// Register a device and drop cached statistics
    pub async fn register_device(&self, device: &Device) -> Result<Device> {
        let device = self.inventory.register_device(device).await?;
        self.invalidate().await;
        Ok(device)
    }

    /// Drop cached statistics from both cache tiers
    pub async fn invalidate(&self) {
        if let Some(local) = &self.local {
            local.invalidate(&STATISTICS_KEY).await;
        }
        if let Err(e) = self.redis.delete(STATISTICS_KEY).await {
            warn!("Failed to invalidate cached device statistics: {}", e);
        }
    }

    async fn load(&self) -> Result<DeviceStatistics> {
        let counts = self.inventory.device_statistics().await?;
        Ok(DeviceStatistics::from_counts(counts))
    }

    /// Redis is best-effort: failures count as misses
    async fn from_redis(&self) -> Option<DeviceStatistics> {
        match self.redis.get(STATISTICS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(statistics) => {
                    debug!("Device statistics served from Redis");
                    Some(statistics)
                }
                Err(e) => {
                    warn!("Discarding unreadable cached device statistics: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Redis read failed, falling back to the inventory: {}", e);
                None
            }
        }
    }

    async fn to_redis(&self, statistics: &DeviceStatistics) {
        let raw = match serde_json::to_string(statistics) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to encode device statistics: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .redis
            .set(STATISTICS_KEY, &raw, Some(self.ttl.as_secs()))
            .await
        {
            warn!("Redis write failed: {}", e);
        }
    }
}

/// Render statistics as CSV with a header row
pub fn render_csv(statistics: &DeviceStatistics) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push_str("\r\n");
    for stat in &statistics.statistics {
        out.push_str(&escape_csv_field(&stat.tag));
        out.push(',');
        out.push_str(&stat.total_devices.to_string());
        out.push_str("\r\n");
    }
    out
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
