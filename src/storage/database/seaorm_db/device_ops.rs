use crate::core::models::{Device, DeviceStatistic};
use crate::storage::directory::DeviceInventory;
use crate::utils::error::{Result, ServiceError, classify_db_error};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, device};
use super::types::SeaOrmDatabase;

#[derive(Debug, FromQueryResult)]
struct TagCount {
    tag: String,
    total: i64,
}

#[async_trait]
impl DeviceInventory for SeaOrmDatabase {
    async fn device_statistics(&self) -> Result<Vec<DeviceStatistic>> {
        debug!("Aggregating device statistics");

        let rows = entities::Device::find()
            .select_only()
            .column(device::Column::Tag)
            .column_as(Expr::col(device::Column::Id).count(), "total")
            .group_by(device::Column::Tag)
            .order_by_asc(device::Column::Tag)
            .into_model::<TagCount>()
            .all(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| DeviceStatistic {
                tag: row.tag,
                total_devices: row.total.max(0) as u64,
            })
            .collect())
    }

    async fn register_device(&self, new_device: &Device) -> Result<Device> {
        debug!("Registering device {}", new_device.serial);

        let existing = entities::Device::find()
            .filter(device::Column::Serial.eq(new_device.serial.as_str()))
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;
        if existing.is_some() {
            return Err(ServiceError::conflict(format!(
                "Device {} already registered",
                new_device.serial
            )));
        }

        entities::Device::insert(device::Model::from_domain_device(new_device))
            .exec_without_returning(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(new_device.clone())
    }
}
