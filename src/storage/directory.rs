//! Store abstractions for users, devices and billing documents

use crate::core::models::{
    ContactProfile, Device, DeviceStatistic, Journal, Subscription, User,
};
use crate::core::rbac::{RoleEdit, RoleSet};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Maximum compare-and-set attempts for a single write before reporting a conflict
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// Persistent directory of users.
///
/// Every mutation bumps `version` by one. Writes taking an `expected_version`
/// fail with `Conflict` when the stored version differs; without one they are
/// last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All users ordered by creation time
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Case-insensitive email lookup
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a new user; `Conflict` when the email is taken
    async fn insert_user(&self, user: &User) -> Result<User>;

    /// Overwrite the single permission
    async fn set_permission(
        &self,
        id: Uuid,
        permission: &str,
        expected_version: Option<i64>,
    ) -> Result<User>;

    /// Replace the whole role set
    async fn set_roles(
        &self,
        id: Uuid,
        roles: &RoleSet,
        expected_version: Option<i64>,
    ) -> Result<User>;

    /// Apply a single-role edit atomically. A no-op edit returns the user
    /// unchanged, version included.
    async fn modify_roles(&self, id: Uuid, edit: &RoleEdit) -> Result<User>;

    /// Hard delete; `NotFound` when absent
    async fn delete_user(&self, id: Uuid) -> Result<()>;

    async fn health_check(&self) -> Result<()>;
}

/// Device inventory
#[async_trait]
pub trait DeviceInventory: Send + Sync {
    /// Device counts grouped by tag, ordered by tag
    async fn device_statistics(&self) -> Result<Vec<DeviceStatistic>>;

    async fn register_device(&self, device: &Device) -> Result<Device>;
}

/// Billing documents keyed by contact
#[async_trait]
pub trait BillingDocuments: Send + Sync {
    /// Insert or replace the profile of a contact
    async fn save_contact_profile(&self, profile: &ContactProfile) -> Result<()>;

    async fn contact_profile(&self, contact_id: &str) -> Result<Option<ContactProfile>>;

    async fn append_journal(&self, journal: &Journal) -> Result<()>;

    /// Journals of a contact in insertion order
    async fn journals(&self, contact_id: &str) -> Result<Vec<Journal>>;

    /// Insert or replace the subscription of a contact
    async fn save_subscription(&self, subscription: &Subscription) -> Result<()>;

    async fn subscription(&self, contact_id: &str) -> Result<Option<Subscription>>;
}
