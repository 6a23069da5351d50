//! Integration tests for billing-reports
//!
//! These tests exercise real storage and HTTP stacks; only the admin client
//! tests put a mock server in front of the client.

pub mod admin_client_tests;
pub mod rbac_api_tests;
pub mod user_directory_tests;
