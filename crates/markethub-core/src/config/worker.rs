//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Days a security event is retained before the daily purge removes it.
    #[serde(default = "default_security_retention")]
    pub security_event_retention_days: i64,
    /// Days a notification is retained before cleanup.
    #[serde(default = "default_notification_retention")]
    pub notification_retention_days: i64,
    /// Maximum stored notifications per user (overflow is trimmed).
    #[serde(default = "default_max_stored")]
    pub max_notifications_per_user: i64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            security_event_retention_days: default_security_retention(),
            notification_retention_days: default_notification_retention(),
            max_notifications_per_user: default_max_stored(),
        }
    }
}

fn default_security_retention() -> i64 {
    1
}

fn default_notification_retention() -> i64 {
    30
}

fn default_max_stored() -> i64 {
    1000
}
