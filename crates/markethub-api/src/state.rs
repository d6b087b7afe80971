//! Shared application state injected into every handler.

use std::sync::Arc;

use markethub_auth::jwt::JwtDecoder;
use markethub_cache::provider::CacheManager;
use markethub_database::DatabasePool;
use markethub_database::repositories::user::UserRepository;
use markethub_realtime::connection::authenticator::WsAuthenticator;
use markethub_realtime::connection::manager::ConnectionManager;
use markethub_service::moderation::ModerationService;
use markethub_service::notification::NotificationService;
use markethub_service::social::{ReactionService, ReviewService, SaveService};
use markethub_service::user::AdminUserService;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database pool (health checks).
    pub db: DatabasePool,
    /// Cache facade (health checks).
    pub cache: Arc<CacheManager>,
    /// JWT decoder for the `AuthUser` extractor.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User repository (ban checks in the extractor).
    pub user_repo: Arc<UserRepository>,
    /// Notification store.
    pub notifications: Arc<NotificationService>,
    /// Detection ingestion + escalation.
    pub moderation: Arc<ModerationService>,
    /// Reaction toggles.
    pub reactions: Arc<ReactionService>,
    /// Save toggles.
    pub saves: Arc<SaveService>,
    /// Reviews and replies.
    pub reviews: Arc<ReviewService>,
    /// Admin user management.
    pub admin_users: Arc<AdminUserService>,
    /// WebSocket connection manager.
    pub connections: Arc<ConnectionManager>,
    /// WebSocket handshake authenticator.
    pub ws_auth: Arc<WsAuthenticator>,
}
