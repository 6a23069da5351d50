//! Redis connection management
//!
//! A pool either holds a multiplexed connection or runs in no-op mode, in
//! which every read misses and every write is dropped.

use crate::config::RedisConfig;
use crate::utils::error::{Result, ServiceError};
use redis::{Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redis connection pool (supports no-op mode when Redis is disabled or unreachable)
#[derive(Clone)]
pub struct RedisPool {
    pub(crate) connection: Option<MultiplexedConnection>,
    pub(crate) url: String,
    pub(crate) noop_mode: bool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("url", &Self::sanitize_url(&self.url))
            .field("noop_mode", &self.noop_mode)
            .finish()
    }
}

/// Redis connection wrapper
pub struct RedisConnection {
    pub(crate) conn: Option<MultiplexedConnection>,
}

impl RedisPool {
    /// Connect to Redis, failing if the server cannot be reached in time
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        info!("Creating Redis connection pool");
        debug!("Redis URL: {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str())?;
        let connection = tokio::time::timeout(
            Duration::from_secs(config.connection_timeout),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| {
            ServiceError::unavailable(format!(
                "Timed out connecting to Redis at {}",
                Self::sanitize_url(&config.url)
            ))
        })??;

        info!("Redis connection pool created successfully");
        Ok(Self {
            connection: Some(connection),
            url: config.url.clone(),
            noop_mode: false,
        })
    }

    /// Connect when enabled, otherwise (or on failure) fall back to no-op mode
    pub async fn connect_or_noop(config: &RedisConfig) -> Self {
        if !config.enabled {
            debug!("Redis disabled, using no-op pool");
            return Self::create_noop();
        }
        match Self::new(config).await {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Redis connection failed, continuing without Redis: {}", e);
                Self::create_noop()
            }
        }
    }

    /// Create a no-op Redis pool
    pub fn create_noop() -> Self {
        Self {
            connection: None,
            url: String::new(),
            noop_mode: true,
        }
    }

    /// Check if this is a no-op pool
    pub fn is_noop(&self) -> bool {
        self.noop_mode
    }

    pub(crate) fn get_connection(&self) -> RedisConnection {
        RedisConnection {
            conn: self.connection.clone(),
        }
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        if self.noop_mode {
            debug!("Redis health check skipped (no-op mode)");
            return Ok(());
        }

        let mut conn = self.get_connection();
        if let Some(ref mut c) = conn.conn {
            let _: String = redis::cmd("PING").query_async(c).await?;
        }
        debug!("Redis health check passed");
        Ok(())
    }

    /// Hide the password of a Redis URL for logging
    pub(crate) fn sanitize_url(url: &str) -> String {
        match url::Url::parse(url) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "invalid_url".to_string(),
        }
    }
}
