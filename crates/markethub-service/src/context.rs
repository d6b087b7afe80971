//! Identity of the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use markethub_entity::user::UserRole;

/// Who is performing the current operation.
///
/// Built once per request by the API layer (from the verified JWT plus a
/// fresh ban check) and threaded into every service call, so ownership and
/// role decisions never re-read the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Acting user's id.
    pub user_id: Uuid,
    /// Role at token issuance.
    pub role: UserRole,
    /// Username, interpolated into notification bodies.
    pub username: String,
    /// When the request arrived.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Stamps a context for a request arriving now.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Whether the acting user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
