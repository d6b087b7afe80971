//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog product. Referenced by reactions, saves, and reviews; the
/// catalog-management collaborator owns the rest of its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// The user who listed the product.
    pub owner_id: Uuid,
    /// Product display name.
    pub name: String,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}
