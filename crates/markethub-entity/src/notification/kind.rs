//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a notification, used for filtering and metadata-match deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone replied to the user's review.
    Reply,
    /// Someone liked or disliked the user's review.
    ReviewReaction,
    /// Direct message from an administrator.
    AdminMessage,
    /// Someone liked the user's product.
    ProductLike,
    /// Someone commented on the user's product.
    ProductComment,
    /// Someone saved the user's product.
    ProductSave,
    /// Security escalation warning.
    SecurityWarning,
    /// The account was locked by the escalation policy.
    AccountLocked,
    /// System-generated notification (admin alerts, maintenance).
    System,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::ReviewReaction => "review_reaction",
            Self::AdminMessage => "admin_message",
            Self::ProductLike => "product_like",
            Self::ProductComment => "product_comment",
            Self::ProductSave => "product_save",
            Self::SecurityWarning => "security_warning",
            Self::AccountLocked => "account_locked",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = markethub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reply" => Ok(Self::Reply),
            "review_reaction" => Ok(Self::ReviewReaction),
            "admin_message" => Ok(Self::AdminMessage),
            "product_like" => Ok(Self::ProductLike),
            "product_comment" => Ok(Self::ProductComment),
            "product_save" => Ok(Self::ProductSave),
            "security_warning" => Ok(Self::SecurityWarning),
            "account_locked" => Ok(Self::AccountLocked),
            "system" => Ok(Self::System),
            _ => Err(markethub_core::AppError::validation(format!(
                "Invalid notification kind: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for kind in [
            NotificationKind::Reply,
            NotificationKind::ReviewReaction,
            NotificationKind::AdminMessage,
            NotificationKind::ProductLike,
            NotificationKind::ProductComment,
            NotificationKind::ProductSave,
            NotificationKind::SecurityWarning,
            NotificationKind::AccountLocked,
            NotificationKind::System,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("poke".parse::<NotificationKind>().is_err());
    }
}
