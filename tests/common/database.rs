//! Test database utilities
//!
//! Each test gets an isolated, migrated in-memory SQLite database.

use billing_reports::config::{CacheConfig, DatabaseConfig, StorageConfig};
use billing_reports::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create and migrate a new in-memory database
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}

/// In-memory SQLite with a single connection
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig::in_memory_sqlite()
}

/// Storage configuration backed by in-memory SQLite and no Redis
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        database: test_db_config(),
        ..StorageConfig::default()
    }
}

/// Cache configuration with the in-process cache switched off
pub fn uncached() -> CacheConfig {
    CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    }
}
