//! Product repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_entity::product::model::Product;

/// Repository for product lookups.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a product by ID.
    pub async fn find_by_id(&self, product_id: Uuid) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }
}
