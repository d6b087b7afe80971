//! Response envelopes.

use serde::Serialize;

/// Success envelope every endpoint wraps its payload in.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` on this path; failures go through the error mapper.
    pub success: bool,
    /// Endpoint-specific payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload for endpoints that only confirm an action happened.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

/// Payload for count endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// The count.
    pub count: i64,
}
