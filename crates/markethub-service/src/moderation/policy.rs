//! Threshold state machine over the per-user daily detection counter.

use markethub_core::config::moderation::ModerationConfig;

/// Action the escalation policy decided on for the latest event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationAction {
    /// Below the warning threshold, or between warning and lock.
    None,
    /// The warning threshold was hit exactly.
    Warn,
    /// The lock threshold was reached.
    Lock,
}

/// Decide the escalation action for a user whose daily count, including the
/// event just recorded, is `count_today`.
///
/// The warning fires only on an exact threshold match so a user sitting
/// between the thresholds is not re-warned on every subsequent event. The
/// lock fires on reach-or-exceed; callers reject events for already-banned
/// users before ever consulting this function, which makes the lock
/// transition terminal for the day.
pub fn evaluate(count_today: i64, config: &ModerationConfig) -> EscalationAction {
    if count_today >= config.lock_threshold {
        EscalationAction::Lock
    } else if count_today == config.warn_threshold {
        EscalationAction::Warn
    } else {
        EscalationAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModerationConfig {
        ModerationConfig::default()
    }

    #[test]
    fn test_below_warn_is_silent() {
        for count in 1..10 {
            assert_eq!(evaluate(count, &config()), EscalationAction::None);
        }
    }

    #[test]
    fn test_tenth_event_warns_exactly_once() {
        assert_eq!(evaluate(10, &config()), EscalationAction::Warn);
    }

    #[test]
    fn test_between_warn_and_lock_is_silent() {
        for count in 11..15 {
            assert_eq!(evaluate(count, &config()), EscalationAction::None);
        }
    }

    #[test]
    fn test_fifteenth_event_locks() {
        assert_eq!(evaluate(15, &config()), EscalationAction::Lock);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = ModerationConfig {
            warn_threshold: 3,
            lock_threshold: 5,
        };
        assert_eq!(evaluate(2, &config), EscalationAction::None);
        assert_eq!(evaluate(3, &config), EscalationAction::Warn);
        assert_eq!(evaluate(4, &config), EscalationAction::None);
        assert_eq!(evaluate(5, &config), EscalationAction::Lock);
    }
}
