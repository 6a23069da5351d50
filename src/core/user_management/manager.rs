//! User management system - main facade

use super::rbac_ops::RbacOperations;
use super::types::{Credentials, PermissionUpdate, Registration, RolesUpdate};
use super::user_ops::UserOperations;
use crate::core::models::User;
use crate::core::rbac::RoleCatalog;
use crate::storage::UserDirectory;
use crate::utils::error::Result;
use std::sync::Arc;

/// User management system
pub struct UserManager {
    user_ops: UserOperations,
    rbac_ops: RbacOperations,
}

impl UserManager {
    pub fn new(directory: Arc<dyn UserDirectory>, catalog: RoleCatalog) -> Self {
        Self {
            user_ops: UserOperations::new(Arc::clone(&directory)),
            rbac_ops: RbacOperations::new(directory, catalog),
        }
    }

    // User operations

    /// All users ordered by creation time
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_ops.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.user_ops.get_user(id).await
    }

    pub async fn register(&self, form: Registration) -> Result<User> {
        self.user_ops.register(form).await
    }

    pub async fn authenticate(&self, credentials: Credentials) -> Result<User> {
        self.user_ops.authenticate(credentials).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.user_ops.delete_user(id).await
    }

    // RBAC operations

    pub fn catalog(&self) -> &RoleCatalog {
        self.rbac_ops.catalog()
    }

    pub async fn replace_permission(&self, id: &str, update: PermissionUpdate) -> Result<User> {
        self.rbac_ops.replace_permission(id, update).await
    }

    pub async fn replace_roles(&self, id: &str, update: RolesUpdate) -> Result<User> {
        self.rbac_ops.replace_roles(id, update).await
    }

    pub async fn add_role(&self, id: &str, role: &str) -> Result<User> {
        self.rbac_ops.add_role(id, role).await
    }

    pub async fn remove_role(&self, id: &str, role: &str) -> Result<User> {
        self.rbac_ops.remove_role(id, role).await
    }
}
