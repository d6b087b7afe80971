//! Cache backend configuration.

use serde::{Deserialize, Serialize};

/// Selects and tunes the cache backend.
///
/// `provider` names the backend (`"memory"` for one node, `"redis"` when
/// several instances must share invalidations); the matching section below
/// supplies its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Which backend to run: `"memory"` or `"redis"`.
    #[serde(default = "provider_default")]
    pub provider: String,
    /// Lifetime, in seconds, for entries stored without an explicit TTL.
    #[serde(default = "entry_ttl_default")]
    pub default_ttl_seconds: u64,
    /// In-memory backend settings.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
    /// Redis backend settings.
    #[serde(default)]
    pub redis: RedisCacheConfig,
}

/// Settings for the in-process moka backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Entry count bound before eviction kicks in.
    #[serde(default = "capacity_default")]
    pub max_capacity: u64,
    /// Lifetime, in seconds, for in-memory entries.
    #[serde(default = "entry_ttl_default")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: capacity_default(),
            time_to_live_seconds: entry_ttl_default(),
        }
    }
}

/// Settings for the Redis backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    /// Redis connection URL.
    #[serde(default = "redis_url_default")]
    pub url: String,
    /// Namespace prepended to every key this application writes.
    #[serde(default = "key_prefix_default")]
    pub key_prefix: String,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: redis_url_default(),
            key_prefix: key_prefix_default(),
        }
    }
}

fn provider_default() -> String {
    "memory".to_string()
}

fn entry_ttl_default() -> u64 {
    300
}

fn capacity_default() -> u64 {
    10_000
}

fn redis_url_default() -> String {
    "redis://localhost:6379".to_string()
}

fn key_prefix_default() -> String {
    "markethub:".to_string()
}
