//! Redis cache backend.
//!
//! Multi-instance deployments point every node at the same Redis so cache
//! invalidations land regardless of which node performed the mutation. The
//! connection manager reconnects on its own; callers never see transient
//! link state.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use markethub_core::config::cache::RedisCacheConfig;
use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_core::traits::cache::CacheProvider;

/// How many keys one SCAN page requests when resolving a pattern.
const SCAN_PAGE: usize = 200;

/// Redis-backed [`CacheProvider`].
#[derive(Clone)]
pub struct RedisCacheProvider {
    conn: ConnectionManager,
    namespace: String,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl RedisCacheProvider {
    /// Opens the connection and verifies it with a ping.
    pub async fn connect(
        config: &RedisCacheConfig,
        default_ttl_seconds: u64,
    ) -> AppResult<Self> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Bad Redis URL", e))?;

        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Redis unreachable", e))?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Cache, "Redis ping failed", e))?;

        info!(namespace = %config.key_prefix, "Connected to Redis");
        Ok(Self {
            conn,
            namespace: config.key_prefix.clone(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.namespace)
    }

    fn redis_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis command failed: {e}"), e)
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(self.namespaced(key)).await.map_err(Self::redis_err)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(self.namespaced(key), value, ttl.as_secs())
            .await
            .map_err(Self::redis_err)
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(Self::redis_err)
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // SCAN instead of KEYS: invalidation runs on request paths and must
        // not stall Redis while it walks the keyspace.
        let full_pattern = self.namespaced(pattern);
        let mut conn = self.conn.clone();

        let mut cursor: u64 = 0;
        let mut dropped: u64 = 0;
        loop {
            let (next, page): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&full_pattern)
                .arg("COUNT")
                .arg(SCAN_PAGE)
                .query_async(&mut conn)
                .await
                .map_err(Self::redis_err)?;

            if !page.is_empty() {
                dropped += page.len() as u64;
                conn.del::<_, ()>(page).await.map_err(Self::redis_err)?;
            }

            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        debug!(pattern, dropped, "Invalidated cache prefix");
        Ok(dropped)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::redis_err)?;
        Ok(pong == "PONG")
    }

    async fn clear(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(Self::redis_err)
    }
}
