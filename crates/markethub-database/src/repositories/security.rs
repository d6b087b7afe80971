//! Security detection log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_entity::security::model::SecurityEvent;

/// Repository for raw security detection events.
#[derive(Debug, Clone)]
pub struct SecurityEventRepository {
    pool: PgPool,
}

impl SecurityEventRepository {
    /// Create a new security event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a detection event.
    pub async fn create(
        &self,
        user_id: Uuid,
        tool: &str,
        detail: Option<&str>,
    ) -> AppResult<SecurityEvent> {
        sqlx::query_as::<_, SecurityEvent>(
            "INSERT INTO security_events (user_id, tool, detail) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(tool)
        .bind(detail)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record security event", e)
        })
    }

    /// Count a user's events inside a time window.
    pub async fn count_in_window(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM security_events \
             WHERE user_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))
    }

    /// Purge events older than the cutoff. Returns the number removed.
    pub async fn purge_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM security_events WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge security events", e)
            })?;
        Ok(result.rows_affected())
    }
}
