//! Channel registry: maps room names to subscribed connections.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

/// Tracks which connections are subscribed to which rooms.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    /// Channel name → subscribed connection ids.
    subscriptions: DashMap<String, Vec<ConnectionId>>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a connection to a channel. Duplicate subscriptions are
    /// collapsed.
    pub fn subscribe(&self, channel: String, conn_id: ConnectionId) {
        let mut subs = self.subscriptions.entry(channel).or_default();
        if !subs.contains(&conn_id) {
            subs.push(conn_id);
        }
    }

    /// Unsubscribes a connection from a channel.
    pub fn unsubscribe(&self, channel: &str, conn_id: ConnectionId) {
        if let Some(mut subs) = self.subscriptions.get_mut(channel) {
            subs.retain(|id| *id != conn_id);
            if subs.is_empty() {
                drop(subs);
                self.subscriptions.remove(channel);
            }
        }
    }

    /// Removes a connection from every channel (disconnect cleanup).
    pub fn unsubscribe_all(&self, conn_id: ConnectionId) {
        let mut emptied: Vec<String> = Vec::new();
        for mut entry in self.subscriptions.iter_mut() {
            entry.value_mut().retain(|id| *id != conn_id);
            if entry.value().is_empty() {
                emptied.push(entry.key().clone());
            }
        }
        for channel in emptied {
            self.subscriptions
                .remove_if(&channel, |_, subs| subs.is_empty());
        }
    }

    /// Returns the subscribers of a channel.
    pub fn subscribers(&self, channel: &str) -> Vec<ConnectionId> {
        self.subscriptions
            .get(channel)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Number of channels a connection is subscribed to.
    pub fn subscription_count(&self, conn_id: ConnectionId) -> usize {
        self.subscriptions
            .iter()
            .filter(|entry| entry.value().contains(&conn_id))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_is_idempotent() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();
        registry.subscribe("product:1".to_string(), conn);
        registry.subscribe("product:1".to_string(), conn);
        assert_eq!(registry.subscribers("product:1").len(), 1);
    }

    #[test]
    fn test_unsubscribe_all_clears_connection() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();
        let other = Uuid::new_v4();
        registry.subscribe("product:1".to_string(), conn);
        registry.subscribe("review:2".to_string(), conn);
        registry.subscribe("review:2".to_string(), other);

        registry.unsubscribe_all(conn);
        assert!(registry.subscribers("product:1").is_empty());
        assert_eq!(registry.subscribers("review:2"), vec![other]);
        assert_eq!(registry.subscription_count(conn), 0);
    }
}
