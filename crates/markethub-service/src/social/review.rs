//! Review creation and deletion with recursive notification compensation.

use std::sync::Arc;

use futures::future::BoxFuture;
use uuid::Uuid;

use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_database::repositories::product::ProductRepository;
use markethub_database::repositories::reaction::ReactionRepository;
use markethub_database::repositories::review::ReviewRepository;
use markethub_entity::notification::NotificationKind;
use markethub_entity::review::Review;

use crate::context::RequestContext;
use crate::notification::dispatcher::EventDispatcher;

/// Handles reviews and threaded replies.
#[derive(Debug)]
pub struct ReviewService {
    /// Review repository.
    review_repo: Arc<ReviewRepository>,
    /// Product repository.
    product_repo: Arc<ProductRepository>,
    /// Reaction repository (cascade cleanup).
    reaction_repo: Arc<ReactionRepository>,
    /// Dispatcher for notifications.
    dispatcher: Arc<EventDispatcher>,
}

impl ReviewService {
    /// Creates a new review service.
    pub fn new(
        review_repo: Arc<ReviewRepository>,
        product_repo: Arc<ProductRepository>,
        reaction_repo: Arc<ReactionRepository>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            review_repo,
            product_repo,
            reaction_repo,
            dispatcher,
        }
    }

    /// Creates a review on a product, or a reply when `parent_id` is given.
    ///
    /// A top-level review notifies the product owner; a reply notifies the
    /// parent review's author.
    pub async fn create_review(
        &self,
        ctx: &RequestContext,
        product_id: Uuid,
        parent_id: Option<Uuid>,
        content: &str,
    ) -> AppResult<Review> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Review content must not be empty"));
        }

        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        let parent = match parent_id {
            Some(parent_id) => {
                let parent = self
                    .review_repo
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent review not found"))?;
                if parent.product_id != product_id {
                    return Err(AppError::validation(
                        "Parent review belongs to a different product",
                    ));
                }
                Some(parent)
            }
            None => None,
        };

        let review = self
            .review_repo
            .create(product_id, ctx.user_id, parent_id, content)
            .await?;

        match parent {
            Some(parent) => {
                self.dispatcher
                    .reply_received(parent.user_id, ctx, &review, &parent)
                    .await?;
            }
            None => {
                self.dispatcher
                    .product_commented(product.owner_id, ctx, &review, &product)
                    .await?;
            }
        }

        Ok(review)
    }

    /// Deletes a review, its reply subtree, and every notification the
    /// subtree ever produced.
    ///
    /// Only the author or an administrator may delete a review.
    pub async fn delete_review(&self, ctx: &RequestContext, review_id: Uuid) -> AppResult<()> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::not_found("Review not found"))?;

        if review.user_id != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::authorization(
                "Only the author or an admin can delete a review",
            ));
        }

        self.delete_tree(review).await
    }

    /// Depth-first removal: compensate and delete every reply before the
    /// review itself, so no notification ever references a missing row.
    fn delete_tree(&self, review: Review) -> BoxFuture<'_, AppResult<()>> {
        Box::pin(async move {
            for reply in self.review_repo.find_replies(review.id).await? {
                self.delete_tree(reply).await?;
            }

            self.retract_notifications(&review).await?;
            self.reaction_repo.delete_for_review(review.id).await?;
            self.review_repo.delete(review.id).await?;
            Ok(())
        })
    }

    /// Retracts every notification kind a review can have produced: reactions
    /// on it, the reply notice it triggered (matched by review id and, for
    /// reply linkage, by parent id), and the product-comment notice.
    async fn retract_notifications(&self, review: &Review) -> AppResult<()> {
        let by_review = serde_json::json!({ "review_id": review.id });

        self.dispatcher
            .retract(NotificationKind::ReviewReaction, by_review.clone())
            .await?;
        self.dispatcher
            .retract(NotificationKind::Reply, by_review.clone())
            .await?;
        self.dispatcher
            .retract(
                NotificationKind::Reply,
                serde_json::json!({ "parent_id": review.id }),
            )
            .await?;
        self.dispatcher
            .retract(NotificationKind::ProductComment, by_review)
            .await?;

        Ok(())
    }
}
