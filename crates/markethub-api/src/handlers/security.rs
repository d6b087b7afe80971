//! Security detection ingestion handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::SecurityEventRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/security/events
///
/// Clients report detections about the authenticated account; the
/// escalation policy decides whether the event warns or locks it.
pub async fn report_detection(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SecurityEventRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let action = state
        .moderation
        .record_detection(auth.user_id, &req.tool, req.detail.as_deref())
        .await?;

    Ok(Json(
        serde_json::json!({ "success": true, "data": { "action": action } }),
    ))
}
