//! Review repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_entity::review::model::Review;

/// Repository for reviews and threaded replies.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a review or reply.
    pub async fn create(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        parent_id: Option<Uuid>,
        content: &str,
    ) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (product_id, user_id, parent_id, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(parent_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create review", e))
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, review_id: Uuid) -> AppResult<Option<Review>> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find review", e))
    }

    /// List direct replies to a review.
    pub async fn find_replies(&self, parent_id: Uuid) -> AppResult<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE parent_id = $1 ORDER BY created_at ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list replies", e))
    }

    /// Delete a single review row.
    pub async fn delete(&self, review_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete review", e))?;
        Ok(())
    }
}
