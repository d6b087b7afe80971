//! Event dispatcher: turns domain events into persisted notifications,
//! cache invalidations, and live pushes.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use markethub_core::result::AppResult;
use markethub_database::repositories::user::UserRepository;
use markethub_entity::notification::{Notification, NotificationKind};
use markethub_entity::product::Product;
use markethub_entity::reaction::ReactionKind;
use markethub_entity::review::Review;

use crate::context::RequestContext;

use super::format;
use super::push::LivePush;
use super::service::NotificationService;

/// One domain event worth surfacing to a user.
#[derive(Debug, Clone)]
pub struct NotificationEvent {
    /// Recipient user.
    pub user_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Title line.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Structured metadata for later metadata-match retraction.
    pub metadata: Option<serde_json::Value>,
    /// The user whose action triggered the event, when there is one.
    pub actor_id: Option<Uuid>,
}

/// Orchestrates the notification side-effects of a domain event, in order:
/// persist, invalidate cache, push to the recipient's live channel.
///
/// Persistence always happens before the push is attempted, so a client that
/// misses the push still discovers the notification on its next list call.
/// Push failures are logged and swallowed; they never roll back the domain
/// action.
#[derive(Debug)]
pub struct EventDispatcher {
    /// Notification store (persists and invalidates).
    store: Arc<NotificationService>,
    /// User repository, for admin fan-out.
    user_repo: Arc<UserRepository>,
    /// Live-push transport handle.
    push: Arc<dyn LivePush>,
}

impl EventDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        store: Arc<NotificationService>,
        user_repo: Arc<UserRepository>,
        push: Arc<dyn LivePush>,
    ) -> Self {
        Self {
            store,
            user_repo,
            push,
        }
    }

    /// Dispatches one notification event.
    ///
    /// Users are never notified about their own actions: events whose actor
    /// equals the recipient are skipped. Returns the persisted notification,
    /// or `None` when the event was skipped.
    pub async fn notify(&self, event: NotificationEvent) -> AppResult<Option<Notification>> {
        if event.actor_id == Some(event.user_id) {
            debug!(user_id = %event.user_id, kind = %event.kind, "Skipping self-notification");
            return Ok(None);
        }

        let notification = self
            .store
            .create(
                event.user_id,
                event.kind,
                &event.title,
                &event.content,
                event.metadata,
            )
            .await?;

        self.push
            .push_notification(event.user_id, &notification)
            .await;
        self.push_unread_badge(event.user_id).await;

        Ok(Some(notification))
    }

    /// Retracts previously dispatched notifications by metadata match and
    /// tells every affected user which ids disappeared.
    pub async fn retract(
        &self,
        kind: NotificationKind,
        filter: serde_json::Value,
    ) -> AppResult<()> {
        let deleted = self.store.delete_by_metadata(kind, &filter).await?;
        if deleted.is_empty() {
            return Ok(());
        }

        // One metadata match can span several owners (e.g. a retracted reply
        // also retracts the copy sent to admins), so group before pushing.
        let mut by_user: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for notification in deleted {
            by_user
                .entry(notification.user_id)
                .or_default()
                .push(notification.id);
        }

        for (user_id, notification_ids) in by_user {
            self.push
                .push_notifications_removed(user_id, &notification_ids)
                .await;
            self.push_unread_badge(user_id).await;
        }

        Ok(())
    }

    // ── Domain wrappers ────────────────────────────────────

    /// Someone replied to a review.
    pub async fn reply_received(
        &self,
        recipient: Uuid,
        actor: &RequestContext,
        reply: &Review,
        parent: &Review,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: recipient,
            kind: NotificationKind::Reply,
            title: "New reply".to_string(),
            content: format::reply_body(&actor.username, &reply.content),
            metadata: Some(serde_json::json!({
                "review_id": reply.id,
                "parent_id": parent.id,
                "product_id": reply.product_id,
                "actor_id": actor.user_id,
            })),
            actor_id: Some(actor.user_id),
        })
        .await?;
        Ok(())
    }

    /// Someone liked or disliked a review.
    pub async fn review_reacted(
        &self,
        recipient: Uuid,
        actor: &RequestContext,
        review: &Review,
        kind: ReactionKind,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: recipient,
            kind: NotificationKind::ReviewReaction,
            title: "Reaction on your review".to_string(),
            content: format::review_reaction_body(&actor.username, kind.as_str(), &review.content),
            metadata: Some(serde_json::json!({
                "review_id": review.id,
                "actor_id": actor.user_id,
            })),
            actor_id: Some(actor.user_id),
        })
        .await?;
        Ok(())
    }

    /// Someone liked a product.
    pub async fn product_liked(
        &self,
        owner: Uuid,
        actor: &RequestContext,
        product: &Product,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: owner,
            kind: NotificationKind::ProductLike,
            title: "Product liked".to_string(),
            content: format::product_like_body(&actor.username, &product.name),
            metadata: Some(serde_json::json!({
                "product_id": product.id,
                "actor_id": actor.user_id,
            })),
            actor_id: Some(actor.user_id),
        })
        .await?;
        Ok(())
    }

    /// Someone commented on a product.
    pub async fn product_commented(
        &self,
        owner: Uuid,
        actor: &RequestContext,
        review: &Review,
        product: &Product,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: owner,
            kind: NotificationKind::ProductComment,
            title: "New comment".to_string(),
            content: format::product_comment_body(
                &actor.username,
                &product.name,
                &review.content,
            ),
            metadata: Some(serde_json::json!({
                "review_id": review.id,
                "product_id": product.id,
                "actor_id": actor.user_id,
            })),
            actor_id: Some(actor.user_id),
        })
        .await?;
        Ok(())
    }

    /// Someone saved a product.
    pub async fn product_saved(
        &self,
        owner: Uuid,
        actor: &RequestContext,
        product: &Product,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: owner,
            kind: NotificationKind::ProductSave,
            title: "Product saved".to_string(),
            content: format::product_save_body(&actor.username, &product.name),
            metadata: Some(serde_json::json!({
                "product_id": product.id,
                "actor_id": actor.user_id,
            })),
            actor_id: Some(actor.user_id),
        })
        .await?;
        Ok(())
    }

    /// Direct message from an administrator to one user.
    pub async fn admin_message(
        &self,
        recipient: Uuid,
        admin: &RequestContext,
        title: &str,
        content: &str,
    ) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id: recipient,
            kind: NotificationKind::AdminMessage,
            title: title.to_string(),
            content: content.to_string(),
            metadata: Some(serde_json::json!({ "actor_id": admin.user_id })),
            actor_id: Some(admin.user_id),
        })
        .await?;
        Ok(())
    }

    /// Security warning to the affected user.
    pub async fn security_warning(&self, user_id: Uuid, count: i64) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id,
            kind: NotificationKind::SecurityWarning,
            title: "Security warning".to_string(),
            content: format::security_warning_body(count),
            metadata: Some(serde_json::json!({ "count": count })),
            actor_id: None,
        })
        .await?;
        Ok(())
    }

    /// Account-locked notice to the affected user.
    pub async fn account_locked(&self, user_id: Uuid) -> AppResult<()> {
        self.notify(NotificationEvent {
            user_id,
            kind: NotificationKind::AccountLocked,
            title: "Account locked".to_string(),
            content: format::account_locked_body(),
            metadata: None,
            actor_id: None,
        })
        .await?;
        Ok(())
    }

    /// System notification to every administrator.
    ///
    /// Each admin gets an independent `notify` call; one failure is logged
    /// and does not block the rest of the fan-out.
    pub async fn notify_admins(
        &self,
        title: &str,
        content: &str,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<()> {
        let admin_ids = self.user_repo.find_admin_ids().await?;

        for admin_id in admin_ids {
            let result = self
                .notify(NotificationEvent {
                    user_id: admin_id,
                    kind: NotificationKind::System,
                    title: title.to_string(),
                    content: content.to_string(),
                    metadata: metadata.clone(),
                    actor_id: None,
                })
                .await;

            if let Err(e) = result {
                error!(admin_id = %admin_id, error = %e, "Failed to notify admin");
            }
        }

        Ok(())
    }

    /// Pushes the account-banned live event to the user's connections.
    pub async fn push_account_banned(&self, user_id: Uuid) {
        self.push.push_account_banned(user_id).await;
    }

    /// Broadcasts a domain state change to a logical room.
    pub async fn channel_event(&self, channel: &str, event: &str, payload: serde_json::Value) {
        self.push.push_channel_event(channel, event, payload).await;
    }

    /// Pushes the current unread count to the user, best-effort.
    async fn push_unread_badge(&self, user_id: Uuid) {
        match self.store.unread_count_for(user_id).await {
            Ok(count) => self.push.push_unread_count(user_id, count).await,
            Err(e) => warn!(user_id = %user_id, error = %e, "Failed to compute unread count"),
        }
    }
}
