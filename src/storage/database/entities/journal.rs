use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal document; a contact may have many
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub contact_id: String,

    pub contact_code: String,

    /// The whole document as JSON
    pub document: Json,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
