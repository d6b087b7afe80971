//! Notification store: cache-fronted CRUD with ownership checks and
//! metadata-match deletion.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use markethub_cache::keys;
use markethub_cache::provider::CacheManager;
use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_core::types::pagination::{PageRequest, PageResponse};
use markethub_database::repositories::notification::NotificationRepository;
use markethub_entity::notification::{Notification, NotificationKind};

use crate::context::RequestContext;

/// Manages persisted notifications for all users.
///
/// Read paths are cache-fronted; every mutating operation invalidates the
/// affected user's listing and unread-count keys before returning. Cache
/// failures are logged and treated as misses; the store never fails a
/// domain operation because the cache is unavailable.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
    /// Cache facade.
    cache: Arc<CacheManager>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>, cache: Arc<CacheManager>) -> Self {
        Self { notif_repo, cache }
    }

    /// Persists a new notification.
    ///
    /// Callers are trusted: `user_id` is not validated against the users
    /// table at this layer.
    pub async fn create(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        content: &str,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<Notification> {
        let notification = self
            .notif_repo
            .create(user_id, kind, title, content, metadata.as_ref())
            .await?;

        self.invalidate_user(user_id).await;
        Ok(notification)
    }

    /// Lists notifications for the current user, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let key = keys::notifications_page(ctx.user_id, page.page, page.page_size);

        match self.cache.get_json::<PageResponse<Notification>>(&key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, falling through to database"),
        }

        let result = self.notif_repo.find_by_user(ctx.user_id, &page).await?;

        if let Err(e) = self
            .cache
            .set_json(&key, &result, std::time::Duration::from_secs(60))
            .await
        {
            warn!(error = %e, "Failed to populate notification listing cache");
        }

        Ok(result)
    }

    /// Gets the unread notification count for the current user.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.unread_count_for(ctx.user_id).await
    }

    /// Gets the unread count for an arbitrary user (dispatcher badge pushes).
    pub async fn unread_count_for(&self, user_id: Uuid) -> AppResult<i64> {
        let key = keys::unread_count(user_id);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                if let Ok(count) = cached.parse::<i64>() {
                    return Ok(count);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, falling through to database"),
        }

        let count = self.notif_repo.count_unread(user_id).await?;

        if let Err(e) = self.cache.set_default(&key, &count.to_string()).await {
            warn!(error = %e, "Failed to populate unread count cache");
        }

        Ok(count)
    }

    /// Marks one notification as read, or all of them when `all` is set.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Option<Uuid>,
        all: bool,
    ) -> AppResult<u64> {
        if all {
            let updated = self.notif_repo.mark_all_read(ctx.user_id).await?;
            self.invalidate_user(ctx.user_id).await;
            return Ok(updated);
        }

        let notification_id = notification_id
            .ok_or_else(|| AppError::validation("notification_id is required unless all=true"))?;
        let notification = self.owned_notification(ctx, notification_id).await?;

        self.notif_repo.mark_read(notification.id).await?;
        self.invalidate_user(ctx.user_id).await;
        Ok(1)
    }

    /// Deletes a notification owned by the current user.
    pub async fn delete(&self, ctx: &RequestContext, notification_id: Uuid) -> AppResult<()> {
        let notification = self.owned_notification(ctx, notification_id).await?;

        self.notif_repo.delete_by_id(notification.id).await?;
        self.invalidate_user(ctx.user_id).await;
        Ok(())
    }

    /// Deletes every notification of `kind` whose metadata is a superset of
    /// `filter`, invalidating the cache of every affected owner. Returns the
    /// deleted rows so the dispatcher can emit per-user removal events.
    ///
    /// Running the same filter twice deletes nothing the second time.
    pub async fn delete_by_metadata(
        &self,
        kind: NotificationKind,
        filter: &serde_json::Value,
    ) -> AppResult<Vec<Notification>> {
        let deleted = self.notif_repo.delete_by_metadata(kind, filter).await?;

        let mut seen_users: Vec<Uuid> = Vec::new();
        for notification in &deleted {
            if !seen_users.contains(&notification.user_id) {
                seen_users.push(notification.user_id);
            }
        }
        for user_id in seen_users {
            self.invalidate_user(user_id).await;
        }

        Ok(deleted)
    }

    /// Fetches a notification and verifies the caller owns it.
    async fn owned_notification(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> AppResult<Notification> {
        let notification = self
            .notif_repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        if notification.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Notification belongs to another user",
            ));
        }

        Ok(notification)
    }

    /// Drops the user's cached listing pages and unread count. Best-effort:
    /// failures are logged, never surfaced.
    async fn invalidate_user(&self, user_id: Uuid) {
        if let Err(e) = self
            .cache
            .delete_pattern(&keys::notifications_pattern(user_id))
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to invalidate listing cache");
        }
        if let Err(e) = self.cache.delete(&keys::unread_count(user_id)).await {
            warn!(user_id = %user_id, error = %e, "Failed to invalidate unread count cache");
        }
    }
}
