use crate::core::rbac::RoleSet;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Email address, stored lowercase (unique)
    #[sea_orm(unique)]
    pub email: String,

    pub password_hash: String,

    pub designation: Option<String>,

    /// Role set as a JSON array of strings
    #[sea_orm(column_type = "Text")]
    pub roles: String,

    /// The single permission value
    pub permissions: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,

    /// Version for optimistic locking
    pub version: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Encode a role set for the `roles` column
pub fn encode_roles(roles: &RoleSet) -> String {
    // A Vec<String> always serializes
    serde_json::to_string(roles).unwrap_or_else(|_| "[]".to_string())
}

impl Model {
    /// Convert SeaORM model to the domain user
    pub fn to_domain_user(&self) -> crate::core::models::User {
        let roles: RoleSet = match serde_json::from_str(&self.roles) {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!("Unreadable roles column for user {}: {}", self.id, e);
                RoleSet::new()
            }
        };

        crate::core::models::User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            designation: self.designation.clone(),
            password_hash: self.password_hash.clone(),
            roles,
            permissions: self.permissions.clone(),
            version: self.version,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        }
    }

    /// Convert a domain user to a SeaORM active model
    pub fn from_domain_user(user: &crate::core::models::User) -> ActiveModel {
        ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.to_lowercase()),
            password_hash: Set(user.password_hash.clone()),
            designation: Set(user.designation.clone()),
            roles: Set(encode_roles(&user.roles)),
            permissions: Set(user.permissions.clone()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
            version: Set(user.version),
        }
    }
}
