//! Pagination query parameters.

use serde::Deserialize;

use markethub_core::types::pagination::PageRequest;

/// Query-string pagination parameters (`?page=2&page_size=20`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page.
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts the raw query parameters into a clamped page request.
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}
