//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A notification to be delivered to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub content: String,
    /// Structured metadata (JSON object) referencing the originating
    /// domain entity; reaction/comment/save notifications always carry
    /// the ids needed to retract them later without this row's own id.
    pub metadata: Option<serde_json::Value>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Check whether this notification's metadata is a superset of `filter`:
    /// every key in the filter must be present with an equal value.
    ///
    /// This mirrors the JSONB `@>` containment used by the store's
    /// metadata-match delete.
    pub fn metadata_matches(&self, filter: &serde_json::Value) -> bool {
        let (Some(meta), Some(wanted)) = (
            self.metadata.as_ref().and_then(|m| m.as_object()),
            filter.as_object(),
        ) else {
            return false;
        };
        wanted.iter().all(|(k, v)| meta.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification_with(metadata: serde_json::Value) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: NotificationKind::ProductLike,
            title: "t".to_string(),
            content: "c".to_string(),
            metadata: Some(metadata),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_superset_match() {
        let n = notification_with(json!({"product_id": "p1", "actor_id": "u1"}));
        assert!(n.metadata_matches(&json!({"product_id": "p1"})));
        assert!(n.metadata_matches(&json!({"product_id": "p1", "actor_id": "u1"})));
    }

    #[test]
    fn test_mismatch_and_missing_key() {
        let n = notification_with(json!({"product_id": "p1"}));
        assert!(!n.metadata_matches(&json!({"product_id": "p2"})));
        assert!(!n.metadata_matches(&json!({"review_id": "r1"})));
    }

    #[test]
    fn test_no_metadata_never_matches() {
        let mut n = notification_with(json!({}));
        n.metadata = None;
        assert!(!n.metadata_matches(&json!({"product_id": "p1"})));
    }
}
