//! Key-value operations

use super::pool::RedisPool;
use crate::utils::error::{Result, ServiceError};
use redis::{AsyncCommands, RedisResult};

impl RedisPool {
    /// Get a value, `None` on miss or in no-op mode
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.noop_mode {
            return Ok(None);
        }

        let mut conn = self.get_connection();
        match conn.conn {
            Some(ref mut c) => {
                let result: RedisResult<Option<String>> = c.get(key).await;
                match result {
                    Ok(value) => Ok(value),
                    Err(e) if e.kind() == redis::ErrorKind::TypeError => Ok(None),
                    Err(e) => Err(ServiceError::Redis(e)),
                }
            }
            None => Ok(None),
        }
    }

    /// Set a value with optional TTL in seconds
    pub async fn set(&self, key: &str, value: &str, ttl: Option<u64>) -> Result<()> {
        if self.noop_mode {
            return Ok(());
        }

        let mut conn = self.get_connection();
        if let Some(ref mut c) = conn.conn {
            match ttl {
                Some(seconds) => {
                    let _: () = c.set_ex(key, value, seconds).await?;
                }
                None => {
                    let _: () = c.set(key, value).await?;
                }
            }
        }
        Ok(())
    }

    /// Delete a key
    pub async fn delete(&self, key: &str) -> Result<()> {
        if self.noop_mode {
            return Ok(());
        }

        let mut conn = self.get_connection();
        if let Some(ref mut c) = conn.conn {
            let _: () = c.del(key).await?;
        }
        Ok(())
    }
}
