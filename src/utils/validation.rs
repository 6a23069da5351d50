//! Input validation helpers shared by the registration and RBAC paths

use crate::utils::error::{Result, ServiceError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate an email address
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "Invalid email address: {}",
            email
        )))
    }
}

/// Validate a password for registration
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Require a field to be present and non-blank, returning it trimmed
pub fn require_field(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ServiceError::validation(format!("{} is required", field))),
    }
}
