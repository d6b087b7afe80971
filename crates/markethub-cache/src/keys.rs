//! Cache key builders for all MarketHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all MarketHub cache keys.
const PREFIX: &str = "markethub";

// ── Notification keys ──────────────────────────────────────

/// Cache key for one page of a user's notification listing.
pub fn notifications_page(user_id: Uuid, page: u64, page_size: u64) -> String {
    format!("{PREFIX}:notif:list:{user_id}:p{page}:s{page_size}")
}

/// Pattern covering every cached notification listing page for a user.
pub fn notifications_pattern(user_id: Uuid) -> String {
    format!("{PREFIX}:notif:list:{user_id}:*")
}

/// Cache key for a user's unread notification count.
pub fn unread_count(user_id: Uuid) -> String {
    format!("{PREFIX}:notif:unread:{user_id}")
}

// ── Product keys ───────────────────────────────────────────

/// Cache key for a product's reaction counts.
pub fn product_reactions(product_id: Uuid) -> String {
    format!("{PREFIX}:product:reactions:{product_id}")
}

/// Cache key for a product's save count.
pub fn product_saves(product_id: Uuid) -> String {
    format!("{PREFIX}:product:saves:{product_id}")
}

// ── Review keys ────────────────────────────────────────────

/// Cache key for a review's reaction counts.
pub fn review_reactions(review_id: Uuid) -> String {
    format!("{PREFIX}:review:reactions:{review_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unread_key() {
        let id = Uuid::nil();
        assert_eq!(
            unread_count(id),
            "markethub:notif:unread:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_listing_pattern_covers_pages() {
        let id = Uuid::nil();
        let page_key = notifications_page(id, 3, 20);
        let pattern = notifications_pattern(id);
        assert!(page_key.starts_with(pattern.trim_end_matches('*')));
    }
}
