//! Utility modules for the billing-reports service
//!
//! - **auth**: password hashing
//! - **error**: error type and HTTP mapping
//! - **logging**: tracing subscriber setup
//! - **validation**: input validation helpers

pub mod auth;
pub mod error;
pub mod logging;
pub mod validation;

pub use error::{Result, ServiceError};
