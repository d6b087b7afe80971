//! Cache facade handed to the service layer.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use markethub_core::config::cache::CacheConfig;
use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_core::traits::cache::CacheProvider;

/// Facade over whichever [`CacheProvider`] the configuration selected.
///
/// Construction picks the backend once; afterwards callers only see the
/// facade's methods, so swapping memory for Redis is a config change.
#[derive(Debug, Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheProvider>,
}

impl CacheManager {
    /// Builds the configured backend and wraps it.
    pub async fn new(config: &CacheConfig) -> AppResult<Self> {
        let backend: Arc<dyn CacheProvider> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!(max_capacity = config.memory.max_capacity, "Using in-memory cache");
                Arc::new(crate::memory::MemoryCacheProvider::new(
                    &config.memory,
                    config.default_ttl_seconds,
                ))
            }
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Using Redis cache");
                Arc::new(
                    crate::redis::RedisCacheProvider::connect(
                        &config.redis,
                        config.default_ttl_seconds,
                    )
                    .await?,
                )
            }
            other => {
                return Err(AppError::configuration(format!(
                    "unsupported cache provider '{other}'"
                )));
            }
        };

        Ok(Self { backend })
    }

    /// Looks up a key.
    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.backend.get(key).await
    }

    /// Stores a value for the given lifetime.
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.backend.set(key, value, ttl).await
    }

    /// Stores a value with the backend's default lifetime.
    pub async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.backend.set_default(key, value).await
    }

    /// Removes a single key.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.backend.delete(key).await
    }

    /// Removes every key under a trailing-wildcard pattern.
    pub async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        self.backend.delete_pattern(pattern).await
    }

    /// Looks up a key and deserializes the hit from JSON.
    pub async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>> {
        self.backend
            .get(key)
            .await?
            .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
            .transpose()
    }

    /// Serializes a value to JSON and stores it for the given lifetime.
    pub async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        self.backend.set(key, &serde_json::to_string(value)?, ttl).await
    }

    /// Reports whether the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.backend.health_check().await
    }

    /// Drops every cached entry.
    pub async fn clear(&self) -> AppResult<()> {
        self.backend.clear().await
    }
}
