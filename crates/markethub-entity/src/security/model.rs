//! Security detection event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One raw security-tool detection reported for a user.
///
/// The escalation counter is derived from these rows: the count of a user's
/// events within the current local day. Rows older than the retention window
/// are purged by the daily worker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SecurityEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// The user the detection was reported for.
    pub user_id: Uuid,
    /// Name of the detected tool.
    pub tool: String,
    /// Free-form detail from the reporting client.
    pub detail: Option<String>,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
}
