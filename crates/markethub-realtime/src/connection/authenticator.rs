//! WebSocket handshake authentication.

use std::sync::Arc;

use markethub_auth::jwt::JwtDecoder;
use markethub_core::error::AppError;
use markethub_database::repositories::user::UserRepository;
use markethub_entity::user::UserRole;
use uuid::Uuid;

/// Result of a successful handshake: the resolved identity the connection
/// runs under.
#[derive(Debug, Clone)]
pub struct AuthenticatedConnection {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// Role, read fresh from the database.
    pub role: UserRole,
}

/// Resolves a bearer token to a connection identity.
#[derive(Debug)]
pub struct WsAuthenticator {
    /// JWT decoder.
    decoder: Arc<JwtDecoder>,
    /// User repository for ban-status and role checks.
    user_repo: Arc<UserRepository>,
}

impl WsAuthenticator {
    /// Creates a new authenticator.
    pub fn new(decoder: Arc<JwtDecoder>, user_repo: Arc<UserRepository>) -> Self {
        Self { decoder, user_repo }
    }

    /// Validates the token and refuses banned accounts.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedConnection, AppError> {
        let claims = self.decoder.decode_access_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))?;

        if user.is_banned() {
            return Err(AppError::authorization("Account is banned"));
        }

        Ok(AuthenticatedConnection {
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
