//! Configuration management for the service
//!
//! This module handles loading, environment overrides and validation of the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{Result, ServiceError};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ServiceError::Config(format!("Failed to read config file: {}", e)))?;

        let app: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ServiceError::Config(format!("Failed to parse config: {}", e)))?;

        let mut config = Self { app };
        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to environment and defaults
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path).await
        } else {
            warn!(
                "Configuration file {:?} not found, using defaults and environment",
                path
            );
            Self::from_env()
        }
    }

    /// Apply `SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`, `REDIS_URL`, `JWT_SECRET`, `LOG_LEVEL`
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.app.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.app.server.port = port
                .parse()
                .map_err(|e| ServiceError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.app.storage.database.url = url;
            self.app.storage.database.enabled = true;
        }
        if let Some(url) = lookup("REDIS_URL") {
            self.app.storage.redis.url = url;
            self.app.storage.redis.enabled = true;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.app.auth.jwt_secret = secret;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.app.logging.level = level;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Get cache configuration
    pub fn cache(&self) -> &CacheConfig {
        &self.app.cache
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.app.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| ServiceError::Config(format!("Server config error: {}", e)))?;

        self.app
            .server
            .cors
            .validate()
            .map_err(|e| ServiceError::Config(format!("CORS config error: {}", e)))?;

        self.app
            .auth
            .validate()
            .map_err(|e| ServiceError::Config(format!("Auth config error: {}", e)))?;

        if self.app.storage.database.enabled && self.app.storage.database.url.is_empty() {
            return Err(ServiceError::Config(
                "Database URL is required when the database is enabled".to_string(),
            ));
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app)
            .map_err(|e| ServiceError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
