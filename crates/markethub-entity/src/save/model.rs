//! Product save entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user bookmarking a product. Unique on `(product_id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductSave {
    /// Unique save identifier.
    pub id: Uuid,
    /// The saved product.
    pub product_id: Uuid,
    /// The saving user.
    pub user_id: Uuid,
    /// When the save was recorded.
    pub created_at: DateTime<Utc>,
}
