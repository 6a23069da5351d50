//! Test fixtures and data factories
//!
//! Factories build real domain objects with unique emails and serials.

use billing_reports::core::models::{
    ContactProfile, Demographics, Device, Journal, SubscribedService, Subscription, User,
};
use billing_reports::core::rbac::RoleSet;
use serde_json::json;
use uuid::Uuid;

/// Password used by every factory-built user
pub const TEST_PASSWORD: &str = "s3cret-passw0rd";

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// User with no roles and an empty permission; the hash is not a real one
    pub fn create() -> User {
        let suffix = short_id();
        User::new(
            format!("User {}", suffix),
            format!("user-{}@example.com", suffix),
            "not-a-real-hash".to_string(),
            Some("Analyst".to_string()),
        )
    }

    pub fn with_email(email: &str) -> User {
        let mut user = Self::create();
        user.email = email.to_string();
        user
    }

    pub fn with_roles(roles: &[&str]) -> User {
        let mut user = Self::create();
        user.roles = roles.iter().collect::<RoleSet>();
        user
    }

    /// Registration body for the HTTP API
    pub fn registration(email: &str) -> serde_json::Value {
        json!({
            "name": "Test User",
            "email": email,
            "password": TEST_PASSWORD,
            "designation": "Analyst",
        })
    }
}

/// Factory for creating test devices
pub struct DeviceFactory;

impl DeviceFactory {
    pub fn tagged(tag: &str) -> Device {
        Device::new(format!("SN-{}", short_id()), tag, None)
    }
}

/// Factory for billing documents
pub struct BillingFactory;

impl BillingFactory {
    pub fn profile(contact_id: &str, first_name: &str) -> ContactProfile {
        ContactProfile {
            contact_id: contact_id.to_string(),
            demographics: Demographics {
                first_name: first_name.to_string(),
                last_name: "Lovelace".to_string(),
            },
        }
    }

    pub fn journal(contact_id: &str, entry: &str) -> Journal {
        let mut fields = serde_json::Map::new();
        fields.insert("entry".to_string(), json!(entry));
        Journal {
            contact_code: format!("C-{}", contact_id),
            contact_id: contact_id.to_string(),
            fields,
        }
    }

    pub fn subscription(contact_id: &str, state: &str) -> Subscription {
        Subscription {
            contact_id: contact_id.to_string(),
            services: vec![SubscribedService {
                expires_on: "2026-12-31".to_string(),
                service_id: "reports-pro".to_string(),
                first_activation_date: "2025-01-01".to_string(),
                state: state.to_string(),
            }],
        }
    }
}
