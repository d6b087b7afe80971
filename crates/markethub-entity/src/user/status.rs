//! User account status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an account may act at all.
///
/// `Banned` is what the escalation policy's lock transition sets; it is
/// terminal until an administrator lifts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account in good standing.
    Normal,
    /// Locked out, by the escalation policy or an administrator.
    Banned,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Banned => "banned",
        })
    }
}
