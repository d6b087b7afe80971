//! In-process cache backend built on moka.
//!
//! Single-node deployments run with this provider; it keeps the same
//! contract as the Redis backend, including prefix-scoped pattern
//! deletion, so the service layer cannot tell the two apart.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use markethub_core::config::cache::MemoryCacheConfig;
use markethub_core::result::AppResult;
use markethub_core::traits::cache::CacheProvider;

/// Stored value plus the lifetime it was written with. Moka expiries are
/// computed per entry, which is how one cache serves both the short-lived
/// listing pages and longer-lived counters.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Moka-backed [`CacheProvider`].
#[derive(Clone)]
pub struct MemoryCacheProvider {
    entries: Cache<String, Entry>,
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl MemoryCacheProvider {
    /// Builds the cache with the configured capacity bound.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(config.max_capacity)
                .expire_after(EntryTtl)
                .build(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = Entry {
            value: value.to_owned(),
            ttl,
        };
        self.entries.insert(key.to_owned(), entry).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // Moka cannot scan by glob; trailing-wildcard patterns reduce to a
        // prefix walk, which covers every pattern the key builders emit.
        let prefix = pattern.trim_end_matches('*');
        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.as_ref().clone())
            .collect();

        let dropped = matching.len() as u64;
        for key in matching {
            self.entries.invalidate(&key).await;
        }

        debug!(pattern, dropped, "Invalidated cache prefix");
        Ok(dropped)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn clear(&self) -> AppResult<()> {
        self.entries.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default(), 300)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache.set("k1", "v1", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("k1").await.unwrap(), Some("v1".to_string()));

        cache.delete("k1").await.unwrap();
        assert_eq!(cache.get("k1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_pattern_scopes_to_prefix() {
        let cache = provider();
        cache.set_default("notif:list:u1:p1", "a").await.unwrap();
        cache.set_default("notif:list:u1:p2", "b").await.unwrap();
        cache.set_default("notif:list:u2:p1", "c").await.unwrap();

        let dropped = cache.delete_pattern("notif:list:u1:*").await.unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(cache.get("notif:list:u1:p1").await.unwrap(), None);
        assert!(cache.get("notif:list:u2:p1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_clear_drops_everything() {
        let cache = provider();
        cache.set_default("a", "1").await.unwrap();
        cache.set_default("b", "2").await.unwrap();

        cache.clear().await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("b").await.unwrap(), None);
    }
}
