//! Product save toggles with notification compensation.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use markethub_cache::keys;
use markethub_cache::provider::CacheManager;
use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_database::repositories::product::ProductRepository;
use markethub_database::repositories::save::SaveRepository;
use markethub_entity::notification::NotificationKind;

use crate::context::RequestContext;
use crate::notification::dispatcher::EventDispatcher;

/// Current save state for a product after a toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SaveState {
    /// Whether the caller now has the product saved.
    pub saved: bool,
    /// Total saves for the product.
    pub count: i64,
}

/// Handles product save toggles.
#[derive(Debug)]
pub struct SaveService {
    /// Save repository.
    save_repo: Arc<SaveRepository>,
    /// Product repository.
    product_repo: Arc<ProductRepository>,
    /// Cache facade.
    cache: Arc<CacheManager>,
    /// Dispatcher for notifications and room broadcasts.
    dispatcher: Arc<EventDispatcher>,
}

impl SaveService {
    /// Creates a new save service.
    pub fn new(
        save_repo: Arc<SaveRepository>,
        product_repo: Arc<ProductRepository>,
        cache: Arc<CacheManager>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            save_repo,
            product_repo,
            cache,
            dispatcher,
        }
    }

    /// Toggles the caller's save on a product.
    ///
    /// Un-saving retracts the save notification the original action
    /// produced. Returns the new state, which is also broadcast to the
    /// product's room.
    pub async fn toggle_save(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
    ) -> AppResult<SaveState> {
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        let saved = if self
            .save_repo
            .remove(product_id, ctx.user_id)
            .await?
            .is_some()
        {
            self.dispatcher
                .retract(
                    NotificationKind::ProductSave,
                    serde_json::json!({
                        "product_id": product_id,
                        "actor_id": ctx.user_id,
                    }),
                )
                .await?;
            false
        } else {
            if self
                .save_repo
                .insert(product_id, ctx.user_id)
                .await?
                .is_some()
            {
                self.dispatcher
                    .product_saved(product.owner_id, ctx, &product)
                    .await?;
            }
            true
        };

        let key = keys::product_saves(product_id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!(error = %e, "Failed to invalidate save count cache");
        }

        let count = self.save_repo.count_for_product(product_id).await?;
        if let Err(e) = self.cache.set_default(&key, &count.to_string()).await {
            warn!(error = %e, "Failed to populate save count cache");
        }

        self.dispatcher
            .channel_event(
                &format!("product:{product_id}"),
                "save_update",
                serde_json::json!({ "product_id": product_id, "saves": count }),
            )
            .await;

        Ok(SaveState { saved, count })
    }

    /// Cache-fronted save count for a product.
    pub async fn save_count(&self, product_id: Uuid) -> AppResult<i64> {
        let key = keys::product_saves(product_id);
        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                if let Ok(count) = cached.parse::<i64>() {
                    return Ok(count);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, falling through to database"),
        }

        let count = self.save_repo.count_for_product(product_id).await?;
        if let Err(e) = self.cache.set_default(&key, &count.to_string()).await {
            warn!(error = %e, "Failed to populate save count cache");
        }
        Ok(count)
    }
}
