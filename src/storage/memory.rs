//! In-memory store
//!
//! Used when the database is disabled and in tests. Every write runs under a
//! single write lock, so compare-and-set never needs a retry here.

use super::directory::{BillingDocuments, DeviceInventory, UserDirectory};
use crate::core::models::{
    ContactProfile, Device, DeviceStatistic, DeviceStatistics, Journal, Subscription, User,
};
use crate::core::rbac::{RoleEdit, RoleSet};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct BillingState {
    profiles: HashMap<String, ContactProfile>,
    journals: Vec<Journal>,
    subscriptions: HashMap<String, Subscription>,
}

/// In-memory implementation of every store trait
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Users in registration order
    users: RwLock<Vec<User>>,
    devices: RwLock<Vec<Device>>,
    billing: RwLock<BillingState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: Uuid) -> ServiceError {
        ServiceError::not_found(format!("User {} not found", id))
    }

    /// Run `mutate` on a stored user under the write lock, bumping the version
    /// when it reports a change
    fn write_user<F>(&self, id: Uuid, expected_version: Option<i64>, mutate: F) -> Result<User>
    where
        F: FnOnce(&mut User) -> bool,
    {
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        if let Some(expected) = expected_version {
            if expected != user.version {
                return Err(ServiceError::conflict(format!(
                    "User {} was modified concurrently (expected version {}, found {})",
                    id, expected, user.version
                )));
            }
        }

        if mutate(user) {
            user.touch();
        }
        Ok(user.clone())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().clone())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(ServiceError::conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        debug!("Inserting user {}", user.id);
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn set_permission(
        &self,
        id: Uuid,
        permission: &str,
        expected_version: Option<i64>,
    ) -> Result<User> {
        self.write_user(id, expected_version, |user| {
            user.permissions = permission.to_string();
            true
        })
    }

    async fn set_roles(
        &self,
        id: Uuid,
        roles: &RoleSet,
        expected_version: Option<i64>,
    ) -> Result<User> {
        self.write_user(id, expected_version, |user| {
            user.roles = roles.clone();
            true
        })
    }

    async fn modify_roles(&self, id: Uuid, edit: &RoleEdit) -> Result<User> {
        self.write_user(id, None, |user| user.roles.apply(edit))
    }

    async fn delete_user(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl DeviceInventory for MemoryStore {
    async fn device_statistics(&self) -> Result<Vec<DeviceStatistic>> {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for device in self.devices.read().iter() {
            *counts.entry(device.tag.clone()).or_default() += 1;
        }
        let statistics = counts
            .into_iter()
            .map(|(tag, total_devices)| DeviceStatistic { tag, total_devices })
            .collect();
        Ok(DeviceStatistics::from_counts(statistics).statistics)
    }

    async fn register_device(&self, device: &Device) -> Result<Device> {
        let mut devices = self.devices.write();
        if devices.iter().any(|d| d.serial == device.serial) {
            return Err(ServiceError::conflict(format!(
                "Device {} already registered",
                device.serial
            )));
        }
        devices.push(device.clone());
        Ok(device.clone())
    }
}

#[async_trait]
impl BillingDocuments for MemoryStore {
    async fn save_contact_profile(&self, profile: &ContactProfile) -> Result<()> {
        self.billing
            .write()
            .profiles
            .insert(profile.contact_id.clone(), profile.clone());
        Ok(())
    }

    async fn contact_profile(&self, contact_id: &str) -> Result<Option<ContactProfile>> {
        Ok(self.billing.read().profiles.get(contact_id).cloned())
    }

    async fn append_journal(&self, journal: &Journal) -> Result<()> {
        self.billing.write().journals.push(journal.clone());
        Ok(())
    }

    async fn journals(&self, contact_id: &str) -> Result<Vec<Journal>> {
        Ok(self
            .billing
            .read()
            .journals
            .iter()
            .filter(|j| j.contact_id == contact_id)
            .cloned()
            .collect())
    }

    async fn save_subscription(&self, subscription: &Subscription) -> Result<()> {
        self.billing
            .write()
            .subscriptions
            .insert(subscription.contact_id.clone(), subscription.clone());
        Ok(())
    }

    async fn subscription(&self, contact_id: &str) -> Result<Option<Subscription>> {
        Ok(self.billing.read().subscriptions.get(contact_id).cloned())
    }
}
