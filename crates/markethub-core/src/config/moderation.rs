//! Security escalation configuration.

use serde::{Deserialize, Serialize};

/// Thresholds for the per-user daily security-event escalation policy.
///
/// A user accumulating `warn_threshold` qualifying events within one local
/// day receives a warning; reaching `lock_threshold` locks the account for
/// good. Both are tunable without code changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Daily event count at which the user is warned (exact match).
    #[serde(default = "default_warn_threshold")]
    pub warn_threshold: i64,
    /// Daily event count at which the account is locked.
    #[serde(default = "default_lock_threshold")]
    pub lock_threshold: i64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            warn_threshold: default_warn_threshold(),
            lock_threshold: default_lock_threshold(),
        }
    }
}

fn default_warn_threshold() -> i64 {
    10
}

fn default_lock_threshold() -> i64 {
    15
}
