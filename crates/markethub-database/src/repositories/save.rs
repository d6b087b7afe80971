//! Product save repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_entity::save::model::ProductSave;

/// Repository for product saves. The unique `(product_id, user_id)` pair is
/// the serialization point for concurrent toggles.
#[derive(Debug, Clone)]
pub struct SaveRepository {
    pool: PgPool,
}

impl SaveRepository {
    /// Create a new save repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove a save if it exists. Returns the removed row.
    pub async fn remove(
        &self,
        product_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ProductSave>> {
        sqlx::query_as::<_, ProductSave>(
            "DELETE FROM product_saves WHERE product_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove save", e))
    }

    /// Insert a save if it does not already exist. Returns the row when a
    /// new save was created, `None` when the user had already saved.
    pub async fn insert(&self, product_id: Uuid, user_id: Uuid) -> AppResult<Option<ProductSave>> {
        sqlx::query_as::<_, ProductSave>(
            "INSERT INTO product_saves (product_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (product_id, user_id) DO NOTHING RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert save", e))
    }

    /// Count saves for a product.
    pub async fn count_for_product(&self, product_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM product_saves WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count saves", e))
    }
}
