use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Device database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Hardware serial (unique)
    #[sea_orm(unique)]
    pub serial: String,

    /// Grouping tag used for statistics
    pub tag: String,

    pub contact_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_domain_device(&self) -> crate::core::models::Device {
        crate::core::models::Device {
            id: self.id,
            serial: self.serial.clone(),
            tag: self.tag.clone(),
            contact_id: self.contact_id.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        }
    }

    pub fn from_domain_device(device: &crate::core::models::Device) -> ActiveModel {
        ActiveModel {
            id: Set(device.id),
            serial: Set(device.serial.clone()),
            tag: Set(device.tag.clone()),
            contact_id: Set(device.contact_id.clone()),
            created_at: Set(device.created_at.into()),
        }
    }
}
