//! Registration, login and lookup

use super::types::{Credentials, Registration};
use crate::core::models::User;
use crate::storage::UserDirectory;
use crate::utils::auth::{hash_password, verify_password};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{require_field, validate_email, validate_password};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Parse a user id from a path segment; an unparseable id names no user
pub(crate) fn parse_user_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|_| ServiceError::not_found(format!("User {} not found", id)))
}

/// User account operations
pub struct UserOperations {
    directory: Arc<dyn UserDirectory>,
}

impl UserOperations {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.directory.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        let id = parse_user_id(id)?;
        self.directory
            .find_user(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("User {} not found", id)))
    }

    /// Register a new user with no roles and an empty permission
    pub async fn register(&self, form: Registration) -> Result<User> {
        let name = require_field("name", form.name.as_deref())?;
        let email = require_field("email", form.email.as_deref())?.to_lowercase();
        validate_email(&email)?;
        let password = form
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("password is required"))?;
        validate_password(&password)?;
        let designation = form
            .designation
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if self.directory.find_user_by_email(&email).await?.is_some() {
            return Err(ServiceError::conflict(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let user = User::new(name, email, hash_password(&password)?, designation);
        let user = self.directory.insert_user(&user).await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Check credentials, returning the matching user
    pub async fn authenticate(&self, credentials: Credentials) -> Result<User> {
        let email = require_field("email", credentials.email.as_deref())?;
        let password = credentials
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ServiceError::validation("password is required"))?;

        let invalid = || ServiceError::unauthorized("Invalid email or password");
        let user = self
            .directory
            .find_user_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&password, &user.password_hash)? {
            warn!("Failed login for user {}", user.id);
            return Err(invalid());
        }
        info!("User {} logged in", user.id);
        Ok(user)
    }

    /// Hard delete
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let id = parse_user_id(id)?;
        self.directory.delete_user(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
