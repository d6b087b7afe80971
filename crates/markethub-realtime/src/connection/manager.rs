//! Socket lifecycle and message routing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use markethub_core::config::realtime::RealtimeConfig;
use markethub_entity::notification::Notification;
use markethub_entity::user::UserRole;
use markethub_service::notification::push::LivePush;

use crate::channel::registry::ChannelRegistry;
use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Owns every live socket: registration, room membership, and delivery.
///
/// Delivery addresses users and rooms, never individual sockets. One
/// message is serialized once and the resulting string fans out to each
/// live handle, so the sender does the work once no matter how many tabs
/// the recipient has open.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Presence registry.
    pool: Arc<ConnectionPool>,
    /// Room membership.
    channels: Arc<ChannelRegistry>,
    /// Engine limits.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Builds an empty manager with the configured limits.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            channels: Arc::new(ChannelRegistry::new()),
            config,
        }
    }

    /// Admits an authenticated connection.
    ///
    /// The caller gets the handle plus the receiving end of the outbound
    /// queue to pump into the socket. A user already at the connection cap
    /// loses their oldest socket to make room. Every connection starts out
    /// subscribed to its user's personal channel.
    pub fn register(
        &self,
        user_id: Uuid,
        username: String,
        role: UserRole,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, username, role, tx));

        let existing = self.pool.for_user(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            if let Some(oldest) = existing.first() {
                warn!(
                    user_id = %user_id,
                    evicted = %oldest.id,
                    cap = self.config.max_connections_per_user,
                    "Connection cap reached, evicting oldest socket"
                );
                oldest.mark_closed();
                self.pool.remove(&oldest.id);
                self.channels.unsubscribe_all(oldest.id);
            }
        }

        self.pool.insert(handle.clone());
        self.channels.subscribe(format!("user:{user_id}"), handle.id);

        info!(conn_id = %handle.id, user_id = %user_id, "Socket registered");
        (handle, rx)
    }

    /// Retires a connection and forgets its room memberships.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        let Some(handle) = self.pool.remove(conn_id) else {
            return;
        };
        handle.mark_closed();
        self.channels.unsubscribe_all(*conn_id);

        info!(conn_id = %conn_id, user_id = %handle.user_id, "Socket retired");
    }

    /// Routes one frame sent by a client.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Frame from unknown connection");
            return;
        };

        match serde_json::from_str::<InboundMessage>(raw) {
            Ok(InboundMessage::Subscribe { channel }) => self.subscribe(&handle, &channel),
            Ok(InboundMessage::Unsubscribe { channel }) => {
                self.channels.unsubscribe(&channel, handle.id);
                debug!(conn_id = %conn_id, channel = %channel, "Left room");
            }
            Ok(InboundMessage::Ping { timestamp }) => {
                self.reply(&handle, &OutboundMessage::Pong { timestamp });
            }
            Err(e) => {
                self.reply(
                    &handle,
                    &OutboundMessage::Error {
                        code: "INVALID_MESSAGE".to_string(),
                        message: format!("Unparseable frame: {e}"),
                    },
                );
            }
        }
    }

    /// Joins a room after limit and permission checks.
    fn subscribe(&self, handle: &ConnectionHandle, channel: &str) {
        if self.channels.subscription_count(handle.id)
            >= self.config.max_subscriptions_per_connection
        {
            self.reply(
                handle,
                &OutboundMessage::Error {
                    code: "MAX_SUBSCRIPTIONS".to_string(),
                    message: format!(
                        "At the subscription limit ({})",
                        self.config.max_subscriptions_per_connection
                    ),
                },
            );
            return;
        }

        if !Self::may_subscribe(handle, channel) {
            self.reply(
                handle,
                &OutboundMessage::Error {
                    code: "FORBIDDEN".to_string(),
                    message: format!("Channel not permitted: {channel}"),
                },
            );
            return;
        }

        self.channels.subscribe(channel.to_string(), handle.id);
        self.reply(
            handle,
            &OutboundMessage::Subscribed {
                channel: channel.to_string(),
            },
        );
        debug!(conn_id = %handle.id, channel = %channel, "Joined room");
    }

    /// Room access policy: your own user channel, the public product and
    /// review rooms, and (for admins only) the `admin:` channels.
    fn may_subscribe(handle: &ConnectionHandle, channel: &str) -> bool {
        match channel.split_once(':') {
            Some(("user", id)) => id == handle.user_id.to_string(),
            Some(("admin", _)) => matches!(handle.role, UserRole::Admin),
            Some(("product" | "review", _)) => true,
            _ => false,
        }
    }

    /// Delivers a message to every socket a user holds. Serializes once;
    /// silently does nothing for offline users.
    pub fn send_to_user(&self, user_id: &Uuid, message: &OutboundMessage) {
        let sockets = self.pool.for_user(user_id);
        if sockets.is_empty() {
            return;
        }

        let Some(wire) = Self::serialize(message) else {
            return;
        };
        for socket in &sockets {
            if !socket.send(wire.clone()) {
                warn!(conn_id = %socket.id, "Dropped user push");
            }
        }
    }

    /// Delivers a message to every subscriber of a room.
    pub fn broadcast_to_channel(&self, channel: &str, message: &OutboundMessage) {
        let members = self.channels.subscribers(channel);
        if members.is_empty() {
            return;
        }

        let Some(wire) = Self::serialize(message) else {
            return;
        };
        for conn_id in &members {
            if let Some(socket) = self.pool.get(conn_id) {
                if !socket.send(wire.clone()) {
                    warn!(conn_id = %conn_id, channel, "Dropped room broadcast");
                }
            }
        }
    }

    /// Answers one connection directly (acks and error frames).
    fn reply(&self, handle: &ConnectionHandle, message: &OutboundMessage) {
        if let Some(wire) = Self::serialize(message) {
            handle.send(wire);
        }
    }

    fn serialize(message: &OutboundMessage) -> Option<String> {
        match serde_json::to_string(message) {
            Ok(wire) => Some(wire),
            Err(e) => {
                error!(error = %e, "Outbound message failed to serialize");
                None
            }
        }
    }

    /// Live sockets across all users.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Whether the user holds at least one live socket.
    pub fn is_user_connected(&self, user_id: &Uuid) -> bool {
        self.pool.is_online(user_id)
    }
}

#[async_trait]
impl LivePush for ConnectionManager {
    async fn push_notification(&self, user_id: Uuid, notification: &Notification) {
        self.send_to_user(
            &user_id,
            &OutboundMessage::Notification {
                notification: notification.clone(),
            },
        );
    }

    async fn push_notifications_removed(&self, user_id: Uuid, notification_ids: &[Uuid]) {
        self.send_to_user(
            &user_id,
            &OutboundMessage::NotificationDeleted {
                notification_ids: notification_ids.to_vec(),
            },
        );
    }

    async fn push_unread_count(&self, user_id: Uuid, count: i64) {
        self.send_to_user(&user_id, &OutboundMessage::UnreadCount { count });
    }

    async fn push_account_banned(&self, user_id: Uuid) {
        self.send_to_user(&user_id, &OutboundMessage::AccountBanned);
    }

    async fn push_channel_event(&self, channel: &str, event: &str, payload: serde_json::Value) {
        self.broadcast_to_channel(
            channel,
            &OutboundMessage::ChannelEvent {
                channel: channel.to_string(),
                event: event.to_string(),
                payload,
                timestamp: chrono::Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(RealtimeConfig::default())
    }

    #[tokio::test]
    async fn test_push_to_offline_user_is_noop() {
        let mgr = manager();
        let nobody = Uuid::new_v4();

        // Must neither panic nor block.
        mgr.push_unread_count(nobody, 5).await;
        mgr.push_account_banned(nobody).await;
        assert_eq!(mgr.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_user_push_reaches_every_connection_once() {
        let mgr = manager();
        let user = Uuid::new_v4();

        let (_h1, mut rx1) = mgr.register(user, "alice".to_string(), UserRole::Member);
        let (_h2, mut rx2) = mgr.register(user, "alice".to_string(), UserRole::Member);
        let (_h3, mut rx3) = mgr.register(user, "alice".to_string(), UserRole::Member);

        mgr.push_unread_count(user, 7).await;

        for rx in [&mut rx1, &mut rx2, &mut rx3] {
            let raw = rx.try_recv().expect("each connection receives the push");
            let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
            assert_eq!(value["type"], "unread_count");
            assert_eq!(value["count"], 7);
            // Exactly once per connection.
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_unregister_clears_presence() {
        let mgr = manager();
        let user = Uuid::new_v4();

        let (h1, _rx1) = mgr.register(user, "bob".to_string(), UserRole::Member);
        assert!(mgr.is_user_connected(&user));

        mgr.unregister(&h1.id);
        assert!(!mgr.is_user_connected(&user));
    }

    #[tokio::test]
    async fn test_channel_broadcast_respects_subscription() {
        let mgr = manager();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        let (h_a, mut rx_a) = mgr.register(user_a, "a".to_string(), UserRole::Member);
        let (_h_b, mut rx_b) = mgr.register(user_b, "b".to_string(), UserRole::Member);

        mgr.handle_inbound(
            &h_a.id,
            r#"{"type":"subscribe","channel":"product:room-1"}"#,
        )
        .await;
        // Drain the subscription ack.
        let ack = rx_a.try_recv().unwrap();
        assert!(ack.contains("subscribed"));

        mgr.push_channel_event("product:room-1", "reaction_update", serde_json::json!({}))
            .await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_admin_channel_requires_admin_role() {
        let mgr = manager();
        let member = Uuid::new_v4();

        let (h, mut rx) = mgr.register(member, "m".to_string(), UserRole::Member);
        mgr.handle_inbound(&h.id, r#"{"type":"subscribe","channel":"admin:alerts"}"#)
            .await;

        let reply = rx.try_recv().unwrap();
        assert!(reply.contains("FORBIDDEN"));
    }

    #[tokio::test]
    async fn test_own_user_channel_is_implicit() {
        let mgr = manager();
        let user = Uuid::new_v4();

        let (_h, mut rx) = mgr.register(user, "carol".to_string(), UserRole::Member);

        // User-addressed pushes work immediately after registration.
        mgr.push_notifications_removed(user, &[Uuid::new_v4()]).await;
        let raw = rx.try_recv().unwrap();
        assert!(raw.contains("notification_deleted"));
    }
}
