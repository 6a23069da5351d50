//! Ordered, duplicate-free role sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's roles.
///
/// Keeps insertion order for display and never holds the same role twice.
/// Values are trimmed on the way in; blank values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(Vec<String>);

/// A single-role change applied server-side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleEdit {
    /// Set union with one role
    Add(String),
    /// Set difference with one role
    Remove(String),
}

impl RoleEdit {
    /// The role this edit concerns
    pub fn role(&self) -> &str {
        match self {
            RoleEdit::Add(role) | RoleEdit::Remove(role) => role,
        }
    }
}

impl RoleSet {
    /// Create an empty role set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no roles
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `role` is a member
    pub fn contains(&self, role: &str) -> bool {
        let role = role.trim();
        self.0.iter().any(|r| r == role)
    }

    /// Insert a role, returning whether the set changed
    pub fn insert(&mut self, role: impl AsRef<str>) -> bool {
        let role = role.as_ref().trim();
        if role.is_empty() || self.contains(role) {
            return false;
        }
        self.0.push(role.to_string());
        true
    }

    /// Remove a role, returning whether the set changed
    pub fn remove(&mut self, role: &str) -> bool {
        let role = role.trim();
        let before = self.0.len();
        self.0.retain(|r| r != role);
        self.0.len() != before
    }

    /// `self ∪ {role}`
    pub fn with(&self, role: &str) -> Self {
        let mut next = self.clone();
        next.insert(role);
        next
    }

    /// `self \ {role}`
    pub fn without(&self, role: &str) -> Self {
        let mut next = self.clone();
        next.remove(role);
        next
    }

    /// Apply an edit in place, returning whether the set changed
    pub fn apply(&mut self, edit: &RoleEdit) -> bool {
        match edit {
            RoleEdit::Add(role) => self.insert(role),
            RoleEdit::Remove(role) => self.remove(role),
        }
    }

    /// Set equality, ignoring order
    pub fn same_members(&self, other: &RoleSet) -> bool {
        self.len() == other.len() && self.0.iter().all(|r| other.contains(r))
    }

    /// Iterate roles in display order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Roles as a slice in display order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Roles joined for display, e.g. `Finance, Sales`
    pub fn joined(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(set: RoleSet) -> Self {
        set.0
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined(", "))
    }
}
