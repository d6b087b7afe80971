//! Detection-log ingestion and escalation orchestration.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use markethub_core::config::moderation::ModerationConfig;
use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_database::repositories::security::SecurityEventRepository;
use markethub_database::repositories::user::UserRepository;
use markethub_entity::user::UserStatus;

use crate::notification::dispatcher::EventDispatcher;

use super::policy::{self, EscalationAction};

/// Ingests raw security detections and applies the escalation policy.
#[derive(Debug)]
pub struct ModerationService {
    /// Security event repository.
    security_repo: Arc<SecurityEventRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Dispatcher for the resulting notifications and pushes.
    dispatcher: Arc<EventDispatcher>,
    /// Escalation thresholds.
    config: ModerationConfig,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        security_repo: Arc<SecurityEventRepository>,
        user_repo: Arc<UserRepository>,
        dispatcher: Arc<EventDispatcher>,
        config: ModerationConfig,
    ) -> Self {
        Self {
            security_repo,
            user_repo,
            dispatcher,
            config,
        }
    }

    /// Records one detection event and runs the escalation transition.
    ///
    /// Ingestion for a banned account fails with an authorization error
    /// before anything is written; locking is terminal for the day window.
    pub async fn record_detection(
        &self,
        user_id: Uuid,
        tool: &str,
        detail: Option<&str>,
    ) -> AppResult<EscalationAction> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.is_banned() {
            return Err(AppError::authorization(
                "Account is banned; detection logging rejected",
            ));
        }

        self.security_repo.create(user_id, tool, detail).await?;

        let (from, to) = local_day_bounds();
        let count = self
            .security_repo
            .count_in_window(user_id, from, to)
            .await?;

        let action = policy::evaluate(count, &self.config);
        match action {
            EscalationAction::Lock => {
                info!(user_id = %user_id, count, "Lock threshold reached, banning account");
                self.user_repo
                    .update_status(user_id, UserStatus::Banned)
                    .await?;

                self.dispatcher.push_account_banned(user_id).await;

                if let Err(e) = self.dispatcher.account_locked(user_id).await {
                    warn!(user_id = %user_id, error = %e, "Failed to create lock notification");
                }

                self.notify_admins_of(&user.username, user_id, count, "locked")
                    .await;
            }
            EscalationAction::Warn => {
                info!(user_id = %user_id, count, "Warning threshold reached");
                if let Err(e) = self.dispatcher.security_warning(user_id, count).await {
                    warn!(user_id = %user_id, error = %e, "Failed to create warning notification");
                }

                self.notify_admins_of(&user.username, user_id, count, "warned")
                    .await;
            }
            EscalationAction::None => {}
        }

        Ok(action)
    }

    /// Alerts every administrator about a warn/lock transition. Failures are
    /// logged; the transition itself already happened.
    async fn notify_admins_of(&self, username: &str, user_id: Uuid, count: i64, verb: &str) {
        let title = format!("User {verb}: {username}");
        let content = format!(
            "Account '{username}' was {verb} after {count} security detections today."
        );
        let metadata = serde_json::json!({ "subject_user_id": user_id, "count": count });

        if let Err(e) = self
            .dispatcher
            .notify_admins(&title, &content, Some(metadata))
            .await
        {
            warn!(user_id = %user_id, error = %e, "Failed to alert admins");
        }
    }
}

/// The current local day as UTC bounds: local midnight up to (exclusive)
/// the next local midnight.
fn local_day_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Local::now();
    let midnight = now.date_naive().and_time(NaiveTime::MIN);

    let start = match Local.from_local_datetime(&midnight) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => now,
    };

    let start_utc = start.with_timezone(&Utc);
    (start_utc, start_utc + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_contain_now() {
        let (from, to) = local_day_bounds();
        let now = Utc::now();
        assert!(from <= now);
        assert!(now < to);
    }
}
