//! Notification title/content formatting.

/// Maximum length of quoted source content inside a notification body.
pub const EXCERPT_LEN: usize = 50;

/// Truncate quoted content to [`EXCERPT_LEN`] characters, appending an
/// ellipsis when something was cut. Operates on characters, not bytes, so
/// multibyte input never splits.
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_LEN).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

/// Body for a reply notification.
pub fn reply_body(actor: &str, content: &str) -> String {
    format!("{actor} replied to your review: \"{}\"", excerpt(content))
}

/// Body for a review reaction notification.
pub fn review_reaction_body(actor: &str, kind: &str, content: &str) -> String {
    format!("{actor} {kind}d your review: \"{}\"", excerpt(content))
}

/// Body for a product like notification.
pub fn product_like_body(actor: &str, product: &str) -> String {
    format!("{actor} liked your product \"{}\"", excerpt(product))
}

/// Body for a product comment notification.
pub fn product_comment_body(actor: &str, product: &str, content: &str) -> String {
    format!(
        "{actor} commented on \"{}\": \"{}\"",
        excerpt(product),
        excerpt(content)
    )
}

/// Body for a product save notification.
pub fn product_save_body(actor: &str, product: &str) -> String {
    format!("{actor} saved your product \"{}\"", excerpt(product))
}

/// Body for a security warning notification.
pub fn security_warning_body(count: i64) -> String {
    format!(
        "Suspicious tooling was detected on your account {count} times today. \
         Continued detections will lock the account."
    )
}

/// Body for an account locked notification.
pub fn account_locked_body() -> String {
    "Your account has been locked after repeated security detections. \
     Contact an administrator to appeal."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(excerpt("hello"), "hello");
    }

    #[test]
    fn test_exactly_fifty_chars_untouched() {
        let text = "a".repeat(50);
        assert_eq!(excerpt(&text), text);
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        let text = "a".repeat(51);
        let result = excerpt(&text);
        assert_eq!(result.chars().count(), 51);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn test_multibyte_not_split() {
        let text = "é".repeat(60);
        let result = excerpt(&text);
        assert_eq!(result.chars().count(), 51);
        assert!(result.starts_with("ééé"));
    }
}
