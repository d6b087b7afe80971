//! PostgreSQL pool configuration.

use serde::{Deserialize, Serialize};

/// Connection pool settings. Only `url` is mandatory; the pool sizing
/// defaults suit a single modest instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "max_connections_default")]
    pub max_connections: u32,
    /// Connections kept open even when idle.
    #[serde(default = "min_connections_default")]
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection.
    #[serde(default = "connect_timeout_default")]
    pub connect_timeout_seconds: u64,
    /// Seconds an idle connection survives before being dropped.
    #[serde(default = "idle_timeout_default")]
    pub idle_timeout_seconds: u64,
}

fn max_connections_default() -> u32 {
    20
}

fn min_connections_default() -> u32 {
    5
}

fn connect_timeout_default() -> u64 {
    10
}

fn idle_timeout_default() -> u64 {
    300
}
