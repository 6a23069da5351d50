//! # billing-reports
//!
//! Administration backend for the billing-reports dashboard.
//!
//! ## Features
//!
//! - **User directory**: registration, login and deletion of admin users
//! - **RBAC**: role sets and a single permission per user, edited by full
//!   replacement or by adding/removing one role, with optimistic versioning
//! - **Device statistics**: per-tag device totals, cached, exportable as CSV
//! - **Billing documents**: contact profiles, journals and subscriptions
//! - **Admin client**: typed HTTP client and the table state machine behind
//!   the roles and permissions views
//!
//! ## Server
//!
//! ```rust,no_run
//! use billing_reports::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/billing-reports.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use billing_reports::client::{DataTable, HttpAdminClient, RolesView};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpAdminClient::new("http://localhost:8000/billing-reports")?;
//! let session = client.login("admin@example.com", "secret-password").await?;
//! let client = client.with_session(&session);
//!
//! let mut roles = DataTable::new(RolesView::default());
//! roles.load(&client).await?;
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::models::{DeviceStatistic, DeviceStatistics, User};
pub use core::rbac::{RoleCatalog, RoleEdit, RoleSet};
pub use core::user_management::UserManager;
pub use storage::StorageLayer;
pub use utils::error::{Result, ServiceError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Service build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build information baked in by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
