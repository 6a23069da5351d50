//! Billing document shapes stored per contact
//!
//! These are fixed contracts: stored and read by `contact_id`, no business
//! logic applies to them.

use serde::{Deserialize, Serialize};

/// Contact demographic details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactProfile {
    pub contact_id: String,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub first_name: String,
    pub last_name: String,
}

/// Journal entry for a contact; fields beyond the identifiers are free-form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    pub contact_code: String,
    pub contact_id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Service subscriptions held by a contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub contact_id: String,
    #[serde(default)]
    pub services: Vec<SubscribedService>,
}

/// One subscribed service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribedService {
    pub expires_on: String,
    pub service_id: String,
    pub first_activation_date: String,
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_journal_keeps_extra_fields() {
        let journal: Journal = serde_json::from_value(json!({
            "contact_code": "C-1",
            "contact_id": "42",
            "amount": 12.5,
            "note": "monthly"
        }))
        .unwrap();
        assert_eq!(journal.fields.len(), 2);
        let back = serde_json::to_value(&journal).unwrap();
        assert_eq!(back["amount"], 12.5);
        assert_eq!(back["contact_code"], "C-1");
    }

    #[test]
    fn test_subscription_services_default_empty() {
        let sub: Subscription = serde_json::from_value(json!({ "contact_id": "42" })).unwrap();
        assert!(sub.services.is_empty());
    }
}
