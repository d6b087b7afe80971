//! Request DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markethub_entity::reaction::ReactionKind;

/// Body for toggling a reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRequest {
    /// Reaction direction.
    pub kind: ReactionKind,
}

/// Body for creating a review or reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    /// Review text.
    pub content: String,
    /// Parent review when replying.
    pub parent_id: Option<Uuid>,
}

/// Body for reporting a security detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEventRequest {
    /// Detected tool name.
    pub tool: String,
    /// Free-form detail.
    pub detail: Option<String>,
}

/// Body for an admin direct message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMessageRequest {
    /// Recipient user.
    pub user_id: Uuid,
    /// Message title.
    pub title: String,
    /// Message body.
    pub content: String,
}
