//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// A MarketHub account, as the notification core sees it.
///
/// Registration, profiles, and credentials belong to the user-management
/// collaborator; this core reads users and flips `status` on lock/unlock,
/// nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name, interpolated into notification bodies.
    pub username: String,
    /// Contact address, if the user gave one.
    pub email: Option<String>,
    /// Privilege tier.
    pub role: UserRole,
    /// Whether the account may act.
    pub status: UserStatus,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this account holds admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the account is currently locked out.
    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Banned
    }
}
