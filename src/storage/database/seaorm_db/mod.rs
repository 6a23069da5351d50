// Module declarations
mod billing_ops;
mod connection;
mod device_ops;
mod types;
mod user_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
