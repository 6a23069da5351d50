//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require a valid JWT on non-public routes
    #[serde(default = "default_true")]
    pub enable_jwt: bool,
    /// JWT secret
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// RBAC configuration
    #[serde(default)]
    pub rbac: RbacConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enable_jwt: true,
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            rbac: RbacConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enable_jwt {
            if self.jwt_secret.len() < 32 {
                return Err(
                    "JWT secret must be at least 32 characters long for security".to_string(),
                );
            }

            if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
                return Err("JWT secret must not use default values. Please generate a secure random secret.".to_string());
            }
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err(
                "JWT expiration should not exceed 30 days for security reasons".to_string(),
            );
        }

        self.rbac.validate()
    }
}

/// Role and permission administration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Restrict user administration routes to `admin_roles`
    #[serde(default)]
    pub enabled: bool,
    /// Roles allowed to administer users
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
    /// Role values offered to operators
    #[serde(default = "default_allowed_roles")]
    pub allowed_roles: Vec<String>,
    /// Permission values offered to operators
    #[serde(default = "default_allowed_permissions")]
    pub allowed_permissions: Vec<String>,
    /// Reject role and permission values outside the lists above
    #[serde(default)]
    pub enforce_catalog: bool,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            admin_roles: default_admin_roles(),
            allowed_roles: default_allowed_roles(),
            allowed_permissions: default_allowed_permissions(),
            enforce_catalog: false,
        }
    }
}

impl RbacConfig {
    /// Validate RBAC configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.admin_roles.is_empty() {
            return Err("RBAC is enabled but no admin roles are configured".to_string());
        }
        if self.enforce_catalog && self.allowed_roles.is_empty() {
            return Err("Role catalog is enforced but empty".to_string());
        }
        if self.enforce_catalog && self.allowed_permissions.is_empty() {
            return Err("Permission catalog is enforced but empty".to_string());
        }
        Ok(())
    }
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about insecure configuration in development
pub fn warn_insecure_config(config: &AuthConfig) {
    if !config.enable_jwt {
        warn!(
            "JWT authentication is disabled! Every route is reachable without credentials. Enable it before deploying to production."
        );
    }
}
