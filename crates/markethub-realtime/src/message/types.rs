//! Inbound and outbound WebSocket message type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markethub_entity::notification::Notification;

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Subscribe to a room.
    Subscribe {
        /// Channel name.
        channel: String,
    },
    /// Unsubscribe from a room.
    Unsubscribe {
        /// Channel name.
        channel: String,
    },
    /// Client keepalive.
    Ping {
        /// Client timestamp.
        timestamp: i64,
    },
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Subscription confirmed.
    Subscribed {
        /// Channel name.
        channel: String,
    },
    /// A new notification, exactly as persisted.
    Notification {
        /// The notification.
        notification: Notification,
    },
    /// Notifications were retracted.
    NotificationDeleted {
        /// The removed notification ids.
        notification_ids: Vec<Uuid>,
    },
    /// Unread counter update.
    UnreadCount {
        /// Current unread count.
        count: i64,
    },
    /// The account has been banned. No payload.
    AccountBanned,
    /// A domain state change in a room the client subscribed to.
    ChannelEvent {
        /// Room name.
        channel: String,
        /// Event name (e.g. `reaction_update`).
        event: String,
        /// Event payload.
        payload: serde_json::Value,
        /// Timestamp.
        timestamp: DateTime<Utc>,
    },
    /// Server keepalive reply.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_subscribe_shape() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"subscribe","channel":"product:abc"}"#).unwrap();
        match msg {
            InboundMessage::Subscribe { channel } => assert_eq!(channel, "product:abc"),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_outbound_tagging() {
        let json = serde_json::to_value(OutboundMessage::UnreadCount { count: 3 }).unwrap();
        assert_eq!(json["type"], "unread_count");
        assert_eq!(json["count"], 3);

        let json = serde_json::to_value(OutboundMessage::AccountBanned).unwrap();
        assert_eq!(json["type"], "account_banned");
    }

    #[test]
    fn test_notification_deleted_lists_ids() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(OutboundMessage::NotificationDeleted {
            notification_ids: vec![id],
        })
        .unwrap();
        assert_eq!(json["notification_ids"][0], id.to_string());
    }
}
