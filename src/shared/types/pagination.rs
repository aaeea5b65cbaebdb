//! Page-based pagination primitives
//!
//! `PageParameter` normalizes the raw `currentPage` / `pageSize` request values,
//! `CommonPager<T>` bundles one page of rows with the echoed page metadata.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when the caller omits `pageSize` or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Upper bound for `pageSize`; larger requests are clamped.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page size bounds applied while normalizing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Normalized page request. Both fields are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParameter {
    current_page: u64,
    page_size: u64,
}

impl PageParameter {
    /// Normalize with the default [`PagingPolicy`].
    pub fn new(current_page: Option<i64>, page_size: Option<i64>) -> Self {
        Self::with_policy(current_page, page_size, PagingPolicy::default())
    }

    /// Missing or non-positive values fall back to defaults; oversized pages are clamped.
    pub fn with_policy(
        current_page: Option<i64>,
        page_size: Option<i64>,
        policy: PagingPolicy,
    ) -> Self {
        let max_page_size = policy.max_page_size.max(1);
        let default_page_size = policy.default_page_size.clamp(1, max_page_size);

        let current_page = match current_page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };
        let page_size = match page_size {
            Some(s) if s > 0 => (s as u64).min(max_page_size),
            _ => default_page_size,
        };

        Self {
            current_page,
            page_size,
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageParameter {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Page metadata echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page (1-based)
    pub current: u64,
    /// Page size
    pub size: u64,
    /// Total number of matching rows across all pages
    pub total: u64,
    /// `ceil(total / size)`
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(page: &PageParameter, total: u64) -> Self {
        Self {
            current: page.current_page(),
            size: page.page_size(),
            total,
            total_pages: total.div_ceil(page.page_size()),
        }
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonPager<T> {
    pub page: PageMeta,
    pub data_list: Vec<T>,
}

impl<T> CommonPager<T> {
    pub fn new(page: PageMeta, data_list: Vec<T>) -> Self {
        Self { page, data_list }
    }

    /// Empty page that still reports the real row count.
    pub fn empty(page: &PageParameter, total: u64) -> Self {
        Self::new(PageMeta::new(page, total), Vec::new())
    }

    /// Convert the rows while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> CommonPager<U>
    where
        F: FnMut(T) -> U,
    {
        CommonPager {
            page: self.page,
            data_list: self.data_list.into_iter().map(f).collect(),
        }
    }
}
