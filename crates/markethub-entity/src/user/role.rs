//! User roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a user is allowed to administer.
///
/// MarketHub has exactly two tiers: administrators moderate the catalog and
/// receive the escalation alerts, members do everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Moderates the catalog, receives escalation alerts.
    Admin,
    /// Regular catalog user.
    Member,
}

impl UserRole {
    /// Whether this role carries admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Member => "member",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), r#""admin""#);
        let parsed: UserRole = serde_json::from_str(r#""member""#).unwrap();
        assert_eq!(parsed, UserRole::Member);
    }
}
