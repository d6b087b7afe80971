//! WebSocket engine limits.

use serde::{Deserialize, Serialize};

/// Bounds on the real-time engine, all per-connection or per-user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Sockets one user may hold at once; the oldest is evicted beyond this.
    #[serde(default = "connections_per_user_default")]
    pub max_connections_per_user: usize,
    /// Outbound queue depth per socket; overflow drops messages.
    #[serde(default = "buffer_default")]
    pub channel_buffer_size: usize,
    /// Rooms one connection may subscribe to.
    #[serde(default = "subscriptions_default")]
    pub max_subscriptions_per_connection: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            max_connections_per_user: connections_per_user_default(),
            channel_buffer_size: buffer_default(),
            max_subscriptions_per_connection: subscriptions_default(),
        }
    }
}

fn connections_per_user_default() -> usize {
    5
}

fn buffer_default() -> usize {
    256
}

fn subscriptions_default() -> usize {
    50
}
