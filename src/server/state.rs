//! Application state shared across HTTP handlers

use crate::auth::{AccessPolicy, JwtHandler};
use crate::config::Config;
use crate::core::rbac::RoleCatalog;
use crate::core::statistics::DeviceStatisticsService;
use crate::core::user_management::UserManager;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is `Arc`-wrapped and read-only; mutation happens in the store
/// and the caches behind them.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// User administration
    pub users: Arc<UserManager>,
    /// Cached device statistics
    pub statistics: Arc<DeviceStatisticsService>,
    /// Token issuing and verification
    pub jwt: Arc<JwtHandler>,
    /// Route access policy
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    /// Wire services over an initialized storage layer
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let catalog = RoleCatalog::from_config(&config.auth().rbac);
        let users = UserManager::new(storage.users.clone(), catalog);
        let statistics = DeviceStatisticsService::new(
            storage.devices.clone(),
            storage.redis.clone(),
            config.cache(),
        );
        let jwt = JwtHandler::new(config.auth());
        let policy = AccessPolicy::from_config(config.auth());

        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            users: Arc::new(users),
            statistics: Arc::new(statistics),
            jwt: Arc::new(jwt),
            policy: Arc::new(policy),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
