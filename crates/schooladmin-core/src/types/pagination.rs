//! Pagination types and page arithmetic for list screens.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Query parameters for a server-driven page, serialized as
/// `?page=..&limit=..&search=..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Free-text search term; omitted when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
}

impl PageRequest {
    /// Create a new page request. Page 0 and limit 0 are coerced to 1;
    /// larger limits are sent as given so they match the page size the
    /// caller pages with.
    pub fn new(page: u64, limit: u64, search: impl Into<String>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: search.into(),
        }
    }

    /// Render as query pairs in the order the backend documents them.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        params
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

/// Number of pages needed for `total_items`. Never less than 1.
pub fn total_pages_for(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 || page_size == 0 {
        1
    } else {
        total_items.div_ceil(page_size)
    }
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Borrow the rows of `page` from a fully fetched collection.
pub fn page_slice<T>(items: &[T], page: u64, page_size: u64) -> &[T] {
    let page_size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}
