//! Review and reply entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product review or a threaded reply to another review.
///
/// Replies set `parent_id` to the review they answer. Deleting a review
/// retracts the notifications it produced and cascades through its replies
/// before the row itself is removed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// The product being reviewed.
    pub product_id: Uuid,
    /// The author.
    pub user_id: Uuid,
    /// Parent review when this row is a reply.
    pub parent_id: Option<Uuid>,
    /// Review body text.
    pub content: String,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Check whether this row is a reply to another review.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
