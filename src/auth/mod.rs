//! Authentication and authorization
//!
//! Requests carry an explicit [`AuthContext`] built from their bearer token.
//! [`authorize`] is a pure decision over that context, the route class and
//! the configured [`AccessPolicy`].

pub mod jwt;

pub use jwt::{Claims, IssuedToken, JwtHandler};

use crate::config::AuthConfig;
use crate::core::rbac::RoleSet;
use crate::utils::error::{Result, ServiceError};
use uuid::Uuid;

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub roles: RoleSet,
    pub permission: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            roles: RoleSet::from(claims.roles),
            permission: claims.permission,
        }
    }
}

/// Access class of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Health, login and registration
    Public,
    /// Any signed-in user
    Authenticated,
    /// Role and permission administration
    UserAdministration,
}

/// Who may do what
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    pub jwt_enabled: bool,
    pub rbac_enabled: bool,
    pub admin_roles: Vec<String>,
}

impl AccessPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            jwt_enabled: config.enable_jwt,
            rbac_enabled: config.rbac.enabled,
            admin_roles: config.rbac.admin_roles.clone(),
        }
    }

    /// Everything allowed, for deployments behind another gatekeeper
    pub fn open() -> Self {
        Self {
            jwt_enabled: false,
            rbac_enabled: false,
            admin_roles: Vec::new(),
        }
    }
}

/// Decide whether `context` may reach a route of class `route`
pub fn authorize(
    context: Option<&AuthContext>,
    route: RouteClass,
    policy: &AccessPolicy,
) -> Result<()> {
    if route == RouteClass::Public || !policy.jwt_enabled {
        return Ok(());
    }

    let context = context.ok_or_else(|| ServiceError::unauthorized("Authentication required"))?;

    match route {
        RouteClass::UserAdministration if policy.rbac_enabled => {
            if policy
                .admin_roles
                .iter()
                .any(|role| context.roles.contains(role))
            {
                Ok(())
            } else {
                Err(ServiceError::forbidden(format!(
                    "One of the roles [{}] is required",
                    policy.admin_roles.join(", ")
                )))
            }
        }
        _ => Ok(()),
    }
}
