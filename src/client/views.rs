//! Concrete table views over the user list

use super::api::AdminApi;
use super::errors::ClientError;
use super::table::{Column, TableView};
use crate::core::models::User;
use async_trait::async_trait;

/// Roles offered in the roles editor
pub const ROLE_OPTIONS: [&str; 3] = ["Finance", "Sales", "Admin"];

/// Values offered in the permissions editor
pub const PERMISSION_OPTIONS: [&str; 2] = ["View", "Not view"];

/// How the roles view sends a checkbox toggle to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleMutation {
    /// PUT the whole resulting set
    Replace,
    /// POST/DELETE the single toggled role
    #[default]
    Delta,
}

/// A single checkbox toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleToggle {
    Grant(String),
    Revoke(String),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RolesView {
    pub mutation: RoleMutation,
}

impl RolesView {
    pub fn new(mutation: RoleMutation) -> Self {
        Self { mutation }
    }
}

const ROLE_COLUMNS: [Column; 4] = [Column::Name, Column::Email, Column::Roles, Column::Actions];

#[async_trait]
impl TableView for RolesView {
    type Input = RoleToggle;

    fn title(&self) -> &'static str {
        "Roles"
    }

    fn columns(&self) -> &'static [Column] {
        &ROLE_COLUMNS
    }

    fn options(&self) -> &'static [&'static str] {
        &ROLE_OPTIONS
    }

    async fn mutate(
        &self,
        api: &dyn AdminApi,
        user: &User,
        input: &RoleToggle,
    ) -> Result<User, ClientError> {
        let id = user.id.to_string();
        match (self.mutation, input) {
            (RoleMutation::Delta, RoleToggle::Grant(role)) => api.add_role(&id, role).await,
            (RoleMutation::Delta, RoleToggle::Revoke(role)) => api.remove_role(&id, role).await,
            (RoleMutation::Replace, RoleToggle::Grant(role)) => {
                let roles = user.roles.with(role);
                api.update_roles(&id, roles.as_slice()).await
            }
            (RoleMutation::Replace, RoleToggle::Revoke(role)) => {
                let roles = user.roles.without(role);
                api.update_roles(&id, roles.as_slice()).await
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionsView;

const PERMISSION_COLUMNS: [Column; 4] = [
    Column::Name,
    Column::Email,
    Column::Permissions,
    Column::Actions,
];

#[async_trait]
impl TableView for PermissionsView {
    /// The selected permission value
    type Input = String;

    fn title(&self) -> &'static str {
        "Permissions"
    }

    fn columns(&self) -> &'static [Column] {
        &PERMISSION_COLUMNS
    }

    fn options(&self) -> &'static [&'static str] {
        &PERMISSION_OPTIONS
    }

    async fn mutate(
        &self,
        api: &dyn AdminApi,
        user: &User,
        input: &String,
    ) -> Result<User, ClientError> {
        api.update_permission(&user.id.to_string(), input).await
    }
}
