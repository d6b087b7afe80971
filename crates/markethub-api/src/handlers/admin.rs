//! Admin handlers: direct messages, ban/unban.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::AdminMessageRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/admin/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AdminMessageRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .admin_users
        .send_message(&auth, req.user_id, &req.title, &req.content)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Message sent".to_string(),
    })))
}

/// POST /api/admin/users/{id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.admin_users.ban_user(&auth, user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}

/// POST /api/admin/users/{id}/unban
pub async fn unban_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = state.admin_users.unban_user(&auth, user_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": user })))
}
