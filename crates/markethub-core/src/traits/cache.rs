//! Backend-agnostic cache interface.
//!
//! The service layer treats the cache purely as a performance optimization:
//! every value it stores can be recomputed from the database, so a provider
//! error on a read path is a miss, never a request failure. Providers own
//! key namespacing and TTL enforcement; callers pass logical keys.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// One cache backend (in-process or Redis).
///
/// Values cross this boundary as JSON strings; the typed helpers below
/// wrap the string operations for callers that cache structured data.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Looks up a key. Expired and absent keys both come back as `None`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores a value for the given lifetime.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Stores a value with the provider's configured default lifetime.
    async fn set_default(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes a single key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Removes every key matching a trailing-wildcard pattern such as
    /// `notif:list:{user}:*`. Returns how many keys were dropped.
    ///
    /// This is what scoped invalidation is built on: mutations delete the
    /// affected user's prefix instead of flushing the whole cache.
    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Reports whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Drops every entry the provider holds.
    async fn clear(&self) -> AppResult<()>;

    /// Looks up a key and deserializes the hit from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        self.get(key)
            .await?
            .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
            .transpose()
    }

    /// Serializes a value to JSON and stores it for the given lifetime.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        self.set(key, &serde_json::to_string(value)?, ttl).await
    }
}
