//! User records held by the user directory

use crate::core::rbac::RoleSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user of the billing-reports system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Immutable identifier assigned on registration
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique)
    pub email: String,
    /// Optional job title captured at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Password hash
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Assigned roles in display order
    #[serde(default)]
    pub roles: RoleSet,
    /// The single stored permission, empty until set
    #[serde(default)]
    pub permissions: String,
    /// Incremented on every mutation
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user with no roles and no permission
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        designation: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            designation,
            password_hash: password_hash.into(),
            roles: RoleSet::new(),
            permissions: String::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a mutation: bump the version and the update timestamp
    pub fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// Whether the user holds any of the given roles
    pub fn has_any_role(&self, roles: &[String]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }
}
