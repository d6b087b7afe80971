//! Authenticated-user extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use markethub_core::error::AppError;
use markethub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The acting user, resolved from the request's bearer token.
///
/// Resolution verifies the JWT and then re-reads the user row: role and
/// ban status come from the database, not the token, so a ban takes effect
/// on the very next request no matter how fresh the token is.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError(AppError::authentication("Bearer token required")))?;

        let claims = state.jwt_decoder.decode_access_token(token)?;

        let user = state
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Unknown user"))?;

        if user.is_banned() {
            return Err(ApiError(AppError::authorization("Account is banned")));
        }

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.role,
            user.username,
        )))
    }
}
