//! One live WebSocket connection.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use markethub_entity::user::UserRole;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// The sending side of one socket, as the rest of the engine sees it.
///
/// The manager serializes each outbound message once and hands the wire
/// string to every relevant handle; a handle only queues bytes onto its
/// socket task. Identity fields are snapshots from the handshake.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: Uuid,
    /// Username, for log lines.
    pub username: String,
    /// Role, for room permission checks.
    pub role: UserRole,
    /// When the handshake completed.
    pub connected_at: DateTime<Utc>,
    sender: mpsc::Sender<String>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Wraps a freshly accepted connection.
    pub fn new(
        user_id: Uuid,
        username: String,
        role: UserRole,
        sender: mpsc::Sender<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            username,
            role,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Queues one serialized message onto the socket.
    ///
    /// Returns `false` when the message was not delivered: a full queue
    /// drops the message (a slow client must not stall the fan-out), and a
    /// closed queue marks the handle dead for the pool to reap.
    pub fn send(&self, msg: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Outbound queue full, dropping message");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Whether the socket is still believed to be open.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Flags the socket as gone. Idempotent.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
