//! Pagination primitives shared by every listing endpoint.
//!
//! Pages are 1-indexed. A response advertises `has_more` instead of a total
//! page count: clients only ever need to know whether another fetch is
//! worthwhile, and the flag is cheap to compute as
//! `page * page_size < total_items`.

use serde::{Deserialize, Serialize};

const PAGE_SIZE_DEFAULT: u64 = 20;
const PAGE_SIZE_CAP: u64 = 100;

/// Which slice of a listing the caller wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-indexed page number.
    #[serde(default = "page_default")]
    pub page: u64,
    /// Items per page.
    #[serde(default = "page_size_default")]
    pub page_size: u64,
}

impl PageRequest {
    /// Builds a request, clamping nonsense values into range rather than
    /// rejecting them.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, PAGE_SIZE_CAP),
        }
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to fetch.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, PAGE_SIZE_DEFAULT)
    }
}

/// One slice of a listing plus enough bookkeeping to page further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page, already ordered.
    pub items: Vec<T>,
    /// 1-indexed page number.
    pub page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Matching items across all pages.
    pub total_items: u64,
    /// Whether fetching the next page would return anything.
    pub has_more: bool,
}

impl<T: Serialize> PageResponse<T> {
    /// Wraps one fetched slice.
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_items,
            has_more: page * page_size < total_items,
        }
    }

    /// A page with nothing on it.
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request.page, request.page_size, 0)
    }
}

fn page_default() -> u64 {
    1
}

fn page_size_default() -> u64 {
    PAGE_SIZE_DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(PageRequest::new(1, 0).page_size, 1);
        assert_eq!(PageRequest::new(1, 500).page_size, PAGE_SIZE_CAP);
        assert_eq!(PageRequest::new(0, 10).page, 1);
    }

    #[test]
    fn test_has_more_across_25_items() {
        let p1 = PageResponse::new(vec![0u8; 10], 1, 10, 25);
        let p2 = PageResponse::new(vec![0u8; 10], 2, 10, 25);
        let p3 = PageResponse::new(vec![0u8; 5], 3, 10, 25);
        assert!(p1.has_more);
        assert!(p2.has_more);
        assert!(!p3.has_more);
    }

    #[test]
    fn test_empty_response_has_no_more() {
        let resp: PageResponse<u8> = PageResponse::empty(&PageRequest::default());
        assert_eq!(resp.total_items, 0);
        assert!(!resp.has_more);
    }
}
