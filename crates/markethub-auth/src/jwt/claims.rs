//! Access-token claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markethub_entity::user::UserRole;

/// Payload carried inside every MarketHub access token.
///
/// `role` and `username` are snapshots from issuance time; anything that
/// must be current (ban status in particular) is re-read from the database
/// when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Uuid,
    /// Role at issuance.
    pub role: UserRole,
    /// Username at issuance.
    pub username: String,
    /// Issued at, seconds since epoch.
    pub iat: i64,
    /// Expires at, seconds since epoch.
    pub exp: i64,
    /// Token id.
    pub jti: Uuid,
}

impl Claims {
    /// Builds claims for a fresh token valid for `ttl` from now.
    pub fn issue(user_id: Uuid, username: &str, role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// The subject as a user id.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Whether the token's lifetime has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
