//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = state.db.health_check().await.unwrap_or(false);
    let cache = state.cache.health_check().await.unwrap_or(false);

    Json(serde_json::json!({
        "status": if database { "ok" } else { "degraded" },
        "database": database,
        "cache": cache,
        "connections": state.connections.connection_count(),
    }))
}
