//! Product and review reaction toggles with notification compensation.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use markethub_cache::keys;
use markethub_cache::provider::CacheManager;
use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_database::repositories::product::ProductRepository;
use markethub_database::repositories::reaction::{ReactionCounts, ReactionRepository};
use markethub_database::repositories::review::ReviewRepository;
use markethub_entity::notification::NotificationKind;
use markethub_entity::reaction::ReactionKind;

use crate::context::RequestContext;
use crate::notification::dispatcher::EventDispatcher;

/// Handles reaction toggles on products and reviews.
///
/// The repository's single-statement toggles serialize on the unique
/// `(entity, user)` constraint, so rapid double-clicks from any number of
/// connections cannot produce lost updates.
#[derive(Debug)]
pub struct ReactionService {
    /// Reaction repository.
    reaction_repo: Arc<ReactionRepository>,
    /// Product repository.
    product_repo: Arc<ProductRepository>,
    /// Review repository.
    review_repo: Arc<ReviewRepository>,
    /// Cache facade.
    cache: Arc<CacheManager>,
    /// Dispatcher for notifications and room broadcasts.
    dispatcher: Arc<EventDispatcher>,
}

impl ReactionService {
    /// Creates a new reaction service.
    pub fn new(
        reaction_repo: Arc<ReactionRepository>,
        product_repo: Arc<ProductRepository>,
        review_repo: Arc<ReviewRepository>,
        cache: Arc<CacheManager>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            reaction_repo,
            product_repo,
            review_repo,
            cache,
            dispatcher,
        }
    }

    /// Toggles the caller's reaction on a product.
    ///
    /// Reacting again with the same kind removes the reaction and retracts
    /// the notification it created; a different kind switches the reaction,
    /// retracting the stale notification before any new one is created.
    /// Returns the recomputed counts, which are also broadcast to the
    /// product's room.
    pub async fn toggle_product_reaction(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<ReactionCounts> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        let removed = self
            .reaction_repo
            .remove_product_reaction(product_id, ctx.user_id, kind)
            .await?;

        let like_filter = serde_json::json!({
            "product_id": product_id,
            "actor_id": ctx.user_id,
        });

        if removed.is_some() {
            // Un-react: retract whatever like notification the reaction made.
            self.dispatcher
                .retract(NotificationKind::ProductLike, like_filter)
                .await?;
        } else {
            // Add or switch. The retract is idempotent and clears the stale
            // notification on a like→dislike switch before the upsert lands.
            self.dispatcher
                .retract(NotificationKind::ProductLike, like_filter)
                .await?;
            self.reaction_repo
                .upsert_product_reaction(product_id, ctx.user_id, kind)
                .await?;

            if kind == ReactionKind::Like {
                self.dispatcher
                    .product_liked(product.owner_id, ctx, &product)
                    .await?;
            }
        }

        self.broadcast_product_counts(product_id).await
    }

    /// Toggles the caller's reaction on a review.
    pub async fn toggle_review_reaction(
        &self,
        ctx: &RequestContext,
        review_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<ReactionCounts> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))?;

        let removed = self
            .reaction_repo
            .remove_review_reaction(review_id, ctx.user_id, kind)
            .await?;

        let filter = serde_json::json!({
            "review_id": review_id,
            "actor_id": ctx.user_id,
        });

        if removed.is_some() {
            self.dispatcher
                .retract(NotificationKind::ReviewReaction, filter)
                .await?;
        } else {
            // Switching like↔dislike must drop the old notification before
            // the recipient can see a stale reaction description.
            self.dispatcher
                .retract(NotificationKind::ReviewReaction, filter)
                .await?;
            self.reaction_repo
                .upsert_review_reaction(review_id, ctx.user_id, kind)
                .await?;

            self.dispatcher
                .review_reacted(review.user_id, ctx, &review, kind)
                .await?;
        }

        self.broadcast_review_counts(review_id).await
    }

    /// Cache-fronted reaction counts for a product.
    pub async fn product_reaction_counts(&self, product_id: Uuid) -> AppResult<ReactionCounts> {
        let key = keys::product_reactions(product_id);
        match self.cache.get_json::<(i64, i64)>(&key).await {
            Ok(Some((likes, dislikes))) => return Ok(ReactionCounts { likes, dislikes }),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, falling through to database"),
        }

        let counts = self.reaction_repo.count_product_reactions(product_id).await?;
        self.cache_counts(&key, counts).await;
        Ok(counts)
    }

    /// Recomputes, caches, and broadcasts the counts for a product.
    async fn broadcast_product_counts(&self, product_id: Uuid) -> AppResult<ReactionCounts> {
        let key = keys::product_reactions(product_id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!(error = %e, "Failed to invalidate reaction count cache");
        }

        let counts = self.reaction_repo.count_product_reactions(product_id).await?;
        self.cache_counts(&key, counts).await;

        self.dispatcher
            .channel_event(
                &format!("product:{product_id}"),
                "reaction_update",
                serde_json::json!({
                    "product_id": product_id,
                    "likes": counts.likes,
                    "dislikes": counts.dislikes,
                }),
            )
            .await;

        Ok(counts)
    }

    /// Recomputes, caches, and broadcasts the counts for a review.
    async fn broadcast_review_counts(&self, review_id: Uuid) -> AppResult<ReactionCounts> {
        let key = keys::review_reactions(review_id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!(error = %e, "Failed to invalidate reaction count cache");
        }

        let counts = self.reaction_repo.count_review_reactions(review_id).await?;
        self.cache_counts(&key, counts).await;

        self.dispatcher
            .channel_event(
                &format!("review:{review_id}"),
                "reaction_update",
                serde_json::json!({
                    "review_id": review_id,
                    "likes": counts.likes,
                    "dislikes": counts.dislikes,
                }),
            )
            .await;

        Ok(counts)
    }

    /// Best-effort cache population.
    async fn cache_counts(&self, key: &str, counts: ReactionCounts) {
        if let Err(e) = self
            .cache
            .set_json(key, &(counts.likes, counts.dislikes), std::time::Duration::from_secs(60))
            .await
        {
            warn!(error = %e, "Failed to populate reaction count cache");
        }
    }
}
