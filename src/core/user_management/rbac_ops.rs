//! Role and permission administration

use super::types::{PermissionUpdate, RolesUpdate};
use super::user_ops::parse_user_id;
use crate::core::models::User;
use crate::core::rbac::{RoleCatalog, RoleEdit, RoleSet};
use crate::storage::UserDirectory;
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;
use tracing::info;

/// RBAC operations over the user directory
pub struct RbacOperations {
    directory: Arc<dyn UserDirectory>,
    catalog: RoleCatalog,
}

impl RbacOperations {
    pub fn new(directory: Arc<dyn UserDirectory>, catalog: RoleCatalog) -> Self {
        Self { directory, catalog }
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Overwrite the permission of a user
    pub async fn replace_permission(&self, id: &str, update: PermissionUpdate) -> Result<User> {
        let id = parse_user_id(id)?;
        let permission = update
            .permissions
            .ok_or_else(|| ServiceError::validation("permissions is required"))?;
        let permission = self.catalog.validate_permission(&permission)?;

        let user = self
            .directory
            .set_permission(id, &permission, update.version)
            .await?;
        info!("Set permission of user {} (version {})", id, user.version);
        Ok(user)
    }

    /// Replace the role set of a user; duplicates are dropped before persisting
    pub async fn replace_roles(&self, id: &str, update: RolesUpdate) -> Result<User> {
        let id = parse_user_id(id)?;
        let roles = update
            .roles
            .ok_or_else(|| ServiceError::validation("roles is required"))?;
        self.catalog.validate_roles(&roles)?;
        let roles = RoleSet::from(roles);

        let user = self.directory.set_roles(id, &roles, update.version).await?;
        info!("Replaced roles of user {} with [{}]", id, user.roles);
        Ok(user)
    }

    /// Add one role; adding a present role changes nothing
    pub async fn add_role(&self, id: &str, role: &str) -> Result<User> {
        let role = self.catalog.validate_role(role)?;
        self.apply(id, RoleEdit::Add(role)).await
    }

    /// Remove one role; removing an absent role changes nothing
    pub async fn remove_role(&self, id: &str, role: &str) -> Result<User> {
        // Removal only needs a non-blank value so stale values can still be cleaned up
        let role = role.trim();
        if role.is_empty() {
            return Err(ServiceError::validation("Role must not be blank"));
        }
        self.apply(id, RoleEdit::Remove(role.to_string())).await
    }

    async fn apply(&self, id: &str, edit: RoleEdit) -> Result<User> {
        let id = parse_user_id(id)?;
        let user = self.directory.modify_roles(id, &edit).await?;
        info!("Applied {:?} to user {} (version {})", edit, id, user.version);
        Ok(user)
    }
}
