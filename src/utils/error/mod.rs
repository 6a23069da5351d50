//! Error handling for the billing-reports service
//!
//! This module defines the service error type, its HTTP mapping and constructor helpers.

mod conversions;
mod helpers;
mod response;
mod types;

pub use conversions::classify_db_error;
pub use response::ErrorResponse;
pub use types::{Result, ServiceError};
