//! Reaction entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Direction of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// Positive reaction.
    Like,
    /// Negative reaction.
    Dislike,
}

impl ReactionKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's reaction to a product.
///
/// The `(product_id, user_id)` pair is unique; the toggle paths rely on that
/// constraint as the serialization point under concurrent clicks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductReaction {
    /// Unique reaction identifier.
    pub id: Uuid,
    /// The product reacted to.
    pub product_id: Uuid,
    /// The reacting user.
    pub user_id: Uuid,
    /// Reaction direction.
    pub kind: ReactionKind,
    /// When the reaction was recorded.
    pub created_at: DateTime<Utc>,
}

/// A user's reaction to a review. Unique on `(review_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewReaction {
    /// Unique reaction identifier.
    pub id: Uuid,
    /// The review reacted to.
    pub review_id: Uuid,
    /// The reacting user.
    pub user_id: Uuid,
    /// Reaction direction.
    pub kind: ReactionKind,
    /// When the reaction was recorded.
    pub created_at: DateTime<Utc>,
}
