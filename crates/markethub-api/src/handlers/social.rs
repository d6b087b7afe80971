//! Social action handlers: reactions, saves, reviews.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::{CreateReviewRequest, ReactionRequest};
use crate::dto::response::{ApiResponse, CountResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/products/{id}/reactions
pub async fn toggle_product_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(req): Json<ReactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let counts = state
        .reactions
        .toggle_product_reaction(&auth, product_id, req.kind)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": counts })))
}

/// GET /api/products/{id}/reactions
pub async fn product_reaction_counts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let counts = state.reactions.product_reaction_counts(product_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": counts })))
}

/// POST /api/reviews/{id}/reactions
pub async fn toggle_review_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Json(req): Json<ReactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let counts = state
        .reactions
        .toggle_review_reaction(&auth, review_id, req.kind)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": counts })))
}

/// POST /api/products/{id}/save
pub async fn toggle_save(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let saved = state.saves.toggle_save(&auth, product_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": saved })))
}

/// GET /api/products/{id}/save
pub async fn product_save_count(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.saves.save_count(product_id).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// POST /api/products/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let review = state
        .reviews
        .create_review(&auth, product_id, req.parent_id, &req.content)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": review })))
}

/// DELETE /api/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.reviews.delete_review(&auth, review_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Review deleted".to_string(),
    })))
}
