//! Storage layer
//!
//! User, device and billing persistence behind the traits in [`directory`],
//! backed by SeaORM or by the in-memory store, plus the Redis pool used for
//! read caching.

/// Database storage module
pub mod database;
/// Store traits
pub mod directory;
/// In-memory store
pub mod memory;
/// Redis cache module
pub mod redis;

pub use directory::{BillingDocuments, DeviceInventory, MAX_WRITE_ATTEMPTS, UserDirectory};
pub use memory::MemoryStore;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which store backs the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Database,
    Memory,
}

/// Main storage layer that orchestrates all storage backends
#[derive(Clone)]
pub struct StorageLayer {
    /// User directory
    pub users: Arc<dyn UserDirectory>,
    /// Device inventory
    pub devices: Arc<dyn DeviceInventory>,
    /// Billing documents, stored and read by contact id without further processing
    pub billing: Arc<dyn BillingDocuments>,
    /// Redis connection pool (no-op when disabled)
    pub redis: Arc<redis::RedisPool>,
    backend: StorageBackend,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("backend", &self.backend)
            .field("redis", &self.redis)
            .finish()
    }
}

/// Storage health status
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealthStatus {
    pub backend: StorageBackend,
    pub database: bool,
    pub cache: bool,
}

impl StorageHealthStatus {
    /// The directory must answer; the cache is optional
    pub fn is_healthy(&self) -> bool {
        self.database
    }
}

impl StorageLayer {
    /// Create the storage layer, connecting and migrating the database when enabled
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        let redis = Arc::new(redis::RedisPool::connect_or_noop(&config.redis).await);

        if !config.database.enabled {
            warn!("Database disabled, users are kept in memory and lost on restart");
            let mut layer = Self::in_memory();
            layer.redis = redis;
            return Ok(layer);
        }

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);
        database.migrate().await?;

        info!("Storage layer initialized successfully");
        Ok(Self {
            users: database.clone(),
            devices: database.clone(),
            billing: database,
            redis,
            backend: StorageBackend::Database,
        })
    }

    /// Storage backed entirely by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Storage backed by an existing in-memory store
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            devices: store.clone(),
            billing: store,
            redis: Arc::new(redis::RedisPool::create_noop()),
            backend: StorageBackend::Memory,
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Health check for all storage backends
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.users.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("User directory health check failed: {}", e);
                false
            }
        };
        let cache = match self.redis.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Redis health check failed: {}", e);
                false
            }
        };
        StorageHealthStatus {
            backend: self.backend,
            database,
            cache,
        }
    }
}
