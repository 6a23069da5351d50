use crate::core::models::User;
use crate::core::rbac::{RoleEdit, RoleSet};
use crate::storage::directory::{MAX_WRITE_ATTEMPTS, UserDirectory};
use crate::utils::error::{Result, ServiceError, classify_db_error};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, user};
use super::types::SeaOrmDatabase;

/// Column written by a compare-and-set
#[derive(Debug, Clone, Copy)]
enum UserField<'a> {
    Permission(&'a str),
    Roles(&'a RoleSet),
}

fn version_conflict(id: Uuid) -> ServiceError {
    ServiceError::conflict(format!(
        "User {} was modified concurrently; reload and try again",
        id
    ))
}

impl SeaOrmDatabase {
    async fn require_user(&self, id: Uuid) -> Result<User> {
        self.find_user(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User {} not found", id)))
    }

    /// `UPDATE users SET .., version = version + 1 WHERE id = ? AND version = ?`.
    /// Returns `None` when another writer got there first.
    async fn compare_and_set(&self, current: &User, field: UserField<'_>) -> Result<Option<User>> {
        let now = Utc::now();
        let mut next = current.clone();

        let mut update = entities::User::update_many()
            .col_expr(user::Column::Version, Expr::value(current.version + 1))
            .col_expr(
                user::Column::UpdatedAt,
                Expr::value(DateTimeWithTimeZone::from(now)),
            );
        match field {
            UserField::Permission(permission) => {
                update = update.col_expr(user::Column::Permissions, Expr::value(permission));
                next.permissions = permission.to_string();
            }
            UserField::Roles(roles) => {
                update = update.col_expr(
                    user::Column::Roles,
                    Expr::value(user::encode_roles(roles)),
                );
                next.roles = roles.clone();
            }
        }

        let result = update
            .filter(user::Column::Id.eq(current.id))
            .filter(user::Column::Version.eq(current.version))
            .exec(&self.db)
            .await
            .map_err(classify_db_error)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        next.version = current.version + 1;
        next.updated_at = now;
        Ok(Some(next))
    }

    /// Overwrite one field, re-reading on version races
    async fn write_field(
        &self,
        id: Uuid,
        field: UserField<'_>,
        expected_version: Option<i64>,
    ) -> Result<User> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self.require_user(id).await?;
            if let Some(expected) = expected_version {
                if expected != current.version {
                    return Err(version_conflict(id));
                }
            }
            if let Some(updated) = self.compare_and_set(&current, field).await? {
                return Ok(updated);
            }
            debug!("Version race on user {} (attempt {})", id, attempt);
        }
        Err(version_conflict(id))
    }
}

#[async_trait]
impl UserDirectory for SeaOrmDatabase {
    async fn list_users(&self) -> Result<Vec<User>> {
        debug!("Listing users");

        let models = entities::User::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(models.iter().map(|model| model.to_domain_user()).collect())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        debug!("Finding user by ID: {}", id);

        let model = entities::User::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(model.map(|model| model.to_domain_user()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        debug!("Finding user by email");

        let model = entities::User::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(model.map(|model| model.to_domain_user()))
    }

    async fn insert_user(&self, new_user: &User) -> Result<User> {
        debug!("Creating user: {}", new_user.id);

        if self.find_user_by_email(&new_user.email).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "A user with email {} already exists",
                new_user.email
            )));
        }

        entities::User::insert(user::Model::from_domain_user(new_user))
            .exec_without_returning(&self.db)
            .await
            .map_err(classify_db_error)?;

        Ok(new_user.clone())
    }

    async fn set_permission(
        &self,
        id: Uuid,
        permission: &str,
        expected_version: Option<i64>,
    ) -> Result<User> {
        self.write_field(id, UserField::Permission(permission), expected_version)
            .await
    }

    async fn set_roles(
        &self,
        id: Uuid,
        roles: &RoleSet,
        expected_version: Option<i64>,
    ) -> Result<User> {
        self.write_field(id, UserField::Roles(roles), expected_version)
            .await
    }

    async fn modify_roles(&self, id: Uuid, edit: &RoleEdit) -> Result<User> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self.require_user(id).await?;
            let mut roles = current.roles.clone();
            if !roles.apply(edit) {
                return Ok(current);
            }
            if let Some(updated) = self
                .compare_and_set(&current, UserField::Roles(&roles))
                .await?
            {
                return Ok(updated);
            }
            debug!("Version race on user {} (attempt {})", id, attempt);
        }
        Err(version_conflict(id))
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        debug!("Deleting user: {}", id);

        let result = entities::User::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(classify_db_error)?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(format!("User {} not found", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
