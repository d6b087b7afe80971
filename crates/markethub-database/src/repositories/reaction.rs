//! Reaction repository implementation.
//!
//! The toggle paths use single atomic statements keyed on the unique
//! `(entity, user)` pair: a compare-and-delete for removal and an
//! insert-or-update for adding/switching. There is no read-then-write
//! window, so concurrent toggles from the same or different connections
//! serialize on the unique constraint.

use sqlx::PgPool;
use uuid::Uuid;

use markethub_core::error::{AppError, ErrorKind};
use markethub_core::result::AppResult;
use markethub_entity::reaction::model::{ProductReaction, ReactionKind, ReviewReaction};

/// Aggregated like/dislike counts for one entity.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct ReactionCounts {
    /// Number of likes.
    pub likes: i64,
    /// Number of dislikes.
    pub dislikes: i64,
}

/// Repository for product and review reactions.
#[derive(Debug, Clone)]
pub struct ReactionRepository {
    pool: PgPool,
}

impl ReactionRepository {
    /// Create a new reaction repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove a product reaction of the given kind if it exists.
    /// Returns the removed row, or `None` when nothing matched.
    pub async fn remove_product_reaction(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<ProductReaction>> {
        sqlx::query_as::<_, ProductReaction>(
            "DELETE FROM product_reactions \
             WHERE product_id = $1 AND user_id = $2 AND kind = $3 RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove reaction", e))
    }

    /// Insert a product reaction, or switch its kind if the user already
    /// reacted. Returns the stored row.
    pub async fn upsert_product_reaction(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<ProductReaction> {
        sqlx::query_as::<_, ProductReaction>(
            "INSERT INTO product_reactions (product_id, user_id, kind) VALUES ($1, $2, $3) \
             ON CONFLICT (product_id, user_id) \
             DO UPDATE SET kind = EXCLUDED.kind, created_at = NOW() RETURNING *",
        )
        .bind(product_id)
        .bind(user_id)
        .bind(kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert reaction", e))
    }

    /// Count likes and dislikes for a product.
    pub async fn count_product_reactions(&self, product_id: Uuid) -> AppResult<ReactionCounts> {
        let rows: Vec<(ReactionKind, i64)> = sqlx::query_as(
            "SELECT kind, COUNT(*) FROM product_reactions WHERE product_id = $1 GROUP BY kind",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reactions", e))?;

        Ok(fold_counts(rows))
    }

    /// Remove a review reaction of the given kind if it exists.
    pub async fn remove_review_reaction(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<ReviewReaction>> {
        sqlx::query_as::<_, ReviewReaction>(
            "DELETE FROM review_reactions \
             WHERE review_id = $1 AND user_id = $2 AND kind = $3 RETURNING *",
        )
        .bind(review_id)
        .bind(user_id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove reaction", e))
    }

    /// Insert a review reaction, or switch its kind if the user already
    /// reacted.
    pub async fn upsert_review_reaction(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<ReviewReaction> {
        sqlx::query_as::<_, ReviewReaction>(
            "INSERT INTO review_reactions (review_id, user_id, kind) VALUES ($1, $2, $3) \
             ON CONFLICT (review_id, user_id) \
             DO UPDATE SET kind = EXCLUDED.kind, created_at = NOW() RETURNING *",
        )
        .bind(review_id)
        .bind(user_id)
        .bind(kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert reaction", e))
    }

    /// Count likes and dislikes for a review.
    pub async fn count_review_reactions(&self, review_id: Uuid) -> AppResult<ReactionCounts> {
        let rows: Vec<(ReactionKind, i64)> = sqlx::query_as(
            "SELECT kind, COUNT(*) FROM review_reactions WHERE review_id = $1 GROUP BY kind",
        )
        .bind(review_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count reactions", e))?;

        Ok(fold_counts(rows))
    }

    /// Delete all reactions attached to a review (cascade path).
    pub async fn delete_for_review(&self, review_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM review_reactions WHERE review_id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete review reactions", e)
            })?;
        Ok(result.rows_affected())
    }
}

fn fold_counts(rows: Vec<(ReactionKind, i64)>) -> ReactionCounts {
    let mut counts = ReactionCounts::default();
    for (kind, count) in rows {
        match kind {
            ReactionKind::Like => counts.likes = count,
            ReactionKind::Dislike => counts.dislikes = count,
        }
    }
    counts
}
