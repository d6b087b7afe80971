//! Admin user management: ban/unban and direct messages.
//!
//! Everything else about users (registration, profiles, passwords) belongs
//! to the user-management collaborator.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use markethub_core::error::AppError;
use markethub_core::result::AppResult;
use markethub_database::repositories::user::UserRepository;
use markethub_entity::user::{User, UserStatus};

use crate::context::RequestContext;
use crate::notification::dispatcher::EventDispatcher;

/// Handles administrative actions on user accounts.
#[derive(Debug)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Dispatcher for the resulting notifications and pushes.
    dispatcher: Arc<EventDispatcher>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            user_repo,
            dispatcher,
        }
    }

    /// Bans a user account. Idempotent: banning a banned user is a no-op.
    pub async fn ban_user(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<User> {
        self.require_admin(ctx)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.is_banned() {
            return Ok(user);
        }

        let user = self
            .user_repo
            .update_status(user_id, UserStatus::Banned)
            .await?;

        info!(user_id = %user_id, admin = %ctx.user_id, "User banned by admin");

        self.dispatcher.push_account_banned(user_id).await;
        self.dispatcher.account_locked(user_id).await?;

        Ok(user)
    }

    /// Lifts a ban. Idempotent on accounts in good standing.
    pub async fn unban_user(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<User> {
        self.require_admin(ctx)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !user.is_banned() {
            return Ok(user);
        }

        let user = self
            .user_repo
            .update_status(user_id, UserStatus::Normal)
            .await?;

        info!(user_id = %user_id, admin = %ctx.user_id, "User unbanned by admin");
        Ok(user)
    }

    /// Sends a direct admin message to one user.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        title: &str,
        content: &str,
    ) -> AppResult<()> {
        self.require_admin(ctx)?;

        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::validation("Title and content are required"));
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        self.dispatcher
            .admin_message(user_id, ctx, title, content)
            .await
    }

    fn require_admin(&self, ctx: &RequestContext) -> AppResult<()> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Admin role required"));
        }
        Ok(())
    }
}
