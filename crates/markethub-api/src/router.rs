//! Route table and middleware stack.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, health, notification, security, social, ws};
use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(health::health))
        .route("/api/health/detailed", get(health::health_detailed))
        // Notifications
        .route("/api/notifications", get(notification::list))
        .route(
            "/api/notifications/unread-count",
            get(notification::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            put(notification::mark_all_read),
        )
        .route(
            "/api/notifications/{id}/read",
            put(notification::mark_read),
        )
        .route("/api/notifications/{id}", delete(notification::delete))
        // Social
        .route(
            "/api/products/{id}/reactions",
            post(social::toggle_product_reaction).get(social::product_reaction_counts),
        )
        .route(
            "/api/products/{id}/save",
            post(social::toggle_save).get(social::product_save_count),
        )
        .route("/api/products/{id}/reviews", post(social::create_review))
        .route(
            "/api/reviews/{id}/reactions",
            post(social::toggle_review_reaction),
        )
        .route("/api/reviews/{id}", delete(social::delete_review))
        // Security detections
        .route("/api/security/events", post(security::report_detection))
        // Admin
        .route("/api/admin/messages", post(admin::send_message))
        .route("/api/admin/users/{id}/ban", post(admin::ban_user))
        .route("/api/admin/users/{id}/unban", post(admin::unban_user))
        // Realtime
        .route("/ws", get(ws::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
