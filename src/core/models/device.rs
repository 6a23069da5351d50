//! Devices and their per-tag statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billable device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    pub serial: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Device {
    pub fn new(
        serial: impl Into<String>,
        tag: impl Into<String>,
        contact_id: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            serial: serial.into(),
            tag: tag.into(),
            contact_id,
            created_at: Utc::now(),
        }
    }
}

/// Device count for one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatistic {
    pub tag: String,
    #[serde(rename = "totalDevices")]
    pub total_devices: u64,
}

/// Response envelope for device statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatistics {
    pub statistics: Vec<DeviceStatistic>,
}

impl DeviceStatistics {
    /// Build from per-tag counts, ordering by tag
    pub fn from_counts(mut statistics: Vec<DeviceStatistic>) -> Self {
        statistics.sort_by(|a, b| a.tag.cmp(&b.tag));
        Self { statistics }
    }

    /// Total devices across all tags
    pub fn total(&self) -> u64 {
        self.statistics.iter().map(|s| s.total_devices).sum()
    }
}
