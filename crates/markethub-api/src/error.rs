//! `AppError` → HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use markethub_core::error::{AppError, ErrorKind};

/// Wrapper letting the domain error implement axum's response trait.
///
/// Deterministic kinds map straight to their status; everything else is a
/// 500 whose details stay in the log, not the response body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Body shape of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    /// Stable machine-readable code.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            _ => {
                tracing::error!(error = %self.0, "Request failed unexpectedly");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: if status == StatusCode::INTERNAL_SERVER_ERROR {
                "internal".to_string()
            } else {
                self.0.kind.code().to_string()
            },
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}
