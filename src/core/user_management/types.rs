//! Request payloads of user management operations
//!
//! Every field is optional on the wire so a missing field surfaces as a
//! validation error naming it rather than a generic body error.

use serde::{Deserialize, Serialize};

/// Registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Replace the single permission of a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionUpdate {
    #[serde(default)]
    pub permissions: Option<String>,
    /// Expected current version; omitted means last-write-wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Replace the whole role set of a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RolesUpdate {
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Expected current version; omitted means last-write-wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}
