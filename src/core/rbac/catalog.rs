//! Validation of role and permission values

use crate::config::RbacConfig;
use crate::utils::error::{Result, ServiceError};

/// The role and permission values operators may assign.
///
/// When `enforce` is false any non-blank value is accepted and the lists only
/// describe what the client offers.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<String>,
    permissions: Vec<String>,
    enforce: bool,
}

impl RoleCatalog {
    /// Build a catalog from explicit lists
    pub fn new(roles: Vec<String>, permissions: Vec<String>, enforce: bool) -> Self {
        Self {
            roles,
            permissions,
            enforce,
        }
    }

    /// Build a catalog from configuration
    pub fn from_config(config: &RbacConfig) -> Self {
        Self::new(
            config.allowed_roles.clone(),
            config.allowed_permissions.clone(),
            config.enforce_catalog,
        )
    }

    /// Offered role values
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Offered permission values
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// Validate one role value, returning it trimmed
    pub fn validate_role(&self, role: &str) -> Result<String> {
        let role = role.trim();
        if role.is_empty() {
            return Err(ServiceError::validation("Role must not be blank"));
        }
        if self.enforce && !self.roles.iter().any(|r| r == role) {
            return Err(ServiceError::validation(format!(
                "Unknown role '{}'; allowed roles: {}",
                role,
                self.roles.join(", ")
            )));
        }
        Ok(role.to_string())
    }

    /// Validate every value of a replacement role list
    pub fn validate_roles(&self, roles: &[String]) -> Result<()> {
        for role in roles {
            self.validate_role(role)?;
        }
        Ok(())
    }

    /// Validate a permission value, returning it trimmed
    pub fn validate_permission(&self, permission: &str) -> Result<String> {
        let permission = permission.trim();
        if permission.is_empty() {
            return Err(ServiceError::validation("permissions must not be blank"));
        }
        if self.enforce && !self.permissions.iter().any(|p| p == permission) {
            return Err(ServiceError::validation(format!(
                "Unknown permission '{}'; allowed permissions: {}",
                permission,
                self.permissions.join(", ")
            )));
        }
        Ok(permission.to_string())
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::from_config(&RbacConfig::default())
    }
}
