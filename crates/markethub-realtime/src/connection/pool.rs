//! The presence registry.
//!
//! Maps each authenticated user to the set of sockets they currently hold.
//! Several connections per user is the normal case (tabs, phone + laptop),
//! and a user's entry disappears the moment their last socket does, so
//! "has an entry" and "is reachable" stay the same question. Lookups and
//! mutation are safe under concurrent connect/disconnect.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::handle::{ConnectionHandle, ConnectionId};

/// All live connections, indexed both ways.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    users: DashMap<Uuid, Vec<Arc<ConnectionHandle>>>,
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection under its owning user.
    pub fn insert(&self, handle: Arc<ConnectionHandle>) {
        self.connections.insert(handle.id, handle.clone());
        self.users.entry(handle.user_id).or_default().push(handle);
    }

    /// Drops a connection, garbage-collecting the user entry if it was the
    /// last one. Returns the dropped handle.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.connections.remove(conn_id)?;

        let emptied = match self.users.get_mut(&handle.user_id) {
            Some(mut owned) => {
                owned.retain(|c| c.id != *conn_id);
                owned.is_empty()
            }
            None => false,
        };
        if emptied {
            self.users.remove_if(&handle.user_id, |_, owned| owned.is_empty());
        }

        Some(handle)
    }

    /// Every socket a user holds right now. Empty for offline users.
    pub fn for_user(&self, user_id: &Uuid) -> Vec<Arc<ConnectionHandle>> {
        self.users
            .get(user_id)
            .map(|owned| owned.value().clone())
            .unwrap_or_default()
    }

    /// Looks up one connection.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.get(conn_id).map(|c| c.value().clone())
    }

    /// Whether the user holds at least one socket.
    pub fn is_online(&self, user_id: &Uuid) -> bool {
        self.users.contains_key(user_id)
    }

    /// Live sockets across all users.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Distinct users currently online.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markethub_entity::user::UserRole;
    use tokio::sync::mpsc;

    fn handle_for(user_id: Uuid) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(8);
        let handle = Arc::new(ConnectionHandle::new(
            user_id,
            "tester".to_string(),
            UserRole::Member,
            tx,
        ));
        (handle, rx)
    }

    #[tokio::test]
    async fn test_multiple_connections_per_user() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();

        let (h1, _rx1) = handle_for(user);
        let (h2, _rx2) = handle_for(user);
        let (h3, _rx3) = handle_for(user);
        pool.insert(h1.clone());
        pool.insert(h2);
        pool.insert(h3);

        assert_eq!(pool.connection_count(), 3);
        assert_eq!(pool.user_count(), 1);
        assert_eq!(pool.for_user(&user).len(), 3);
    }

    #[tokio::test]
    async fn test_entry_removed_when_last_connection_drops() {
        let pool = ConnectionPool::new();
        let user = Uuid::new_v4();

        let (h1, _rx1) = handle_for(user);
        let (h2, _rx2) = handle_for(user);
        pool.insert(h1.clone());
        pool.insert(h2.clone());

        pool.remove(&h1.id);
        assert!(pool.is_online(&user));

        pool.remove(&h2.id);
        assert!(!pool.is_online(&user));
        assert_eq!(pool.user_count(), 0);
        assert!(pool.for_user(&user).is_empty());
    }

    #[tokio::test]
    async fn test_offline_user_lookup_is_empty() {
        let pool = ConnectionPool::new();
        let nobody = Uuid::new_v4();
        assert!(!pool.is_online(&nobody));
        assert!(pool.for_user(&nobody).is_empty());
        assert!(pool.remove(&Uuid::new_v4()).is_none());
    }
}
