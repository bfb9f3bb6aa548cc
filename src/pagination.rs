//! Pagination helpers shared by list queries and page rendering.

use serde::Serialize;

/// Number of items shown per storefront page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page window applied to a repository list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page, 1-based.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
}

/// A single page of items together with paging metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}
