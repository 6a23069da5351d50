//! Core business logic: domain models, RBAC value types, user administration
//! and device statistics

pub mod models;
pub mod rbac;
pub mod statistics;
pub mod user_management;
