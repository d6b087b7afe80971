//! Live-push transport seam.
//!
//! The dispatcher addresses *users*, never individual connections; fanning a
//! message out to every live socket a user holds is the transport's job.
//! `markethub-realtime` implements this trait, and the dispatcher receives it
//! as a trait object wired up after both sides exist, which keeps the
//! notification and realtime crates out of a dependency cycle.
//!
//! Every method is best-effort: a user with no live connections is a silent
//! no-op, and implementations must not fail the caller.

use async_trait::async_trait;
use uuid::Uuid;

use markethub_entity::notification::Notification;

/// Outbound real-time delivery used by the event dispatcher.
#[async_trait]
pub trait LivePush: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a freshly persisted notification to the user's channel.
    async fn push_notification(&self, user_id: Uuid, notification: &Notification);

    /// Tell the user's clients that notifications were removed.
    async fn push_notifications_removed(&self, user_id: Uuid, notification_ids: &[Uuid]);

    /// Update the user's unread counter badge.
    async fn push_unread_count(&self, user_id: Uuid, count: i64);

    /// Tell the user's clients the account has been banned.
    async fn push_account_banned(&self, user_id: Uuid);

    /// Broadcast a domain state change to a logical room (e.g. everyone
    /// viewing one product).
    async fn push_channel_event(&self, channel: &str, event: &str, payload: serde_json::Value);
}
