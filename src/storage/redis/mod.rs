//! Redis storage implementation
//!
//! - `pool` - Connection management, no-op mode and health checks
//! - `cache` - Key-value operations with TTL
//! - `tests` - Module tests

mod cache;
mod pool;

pub use pool::{RedisConnection, RedisPool};
