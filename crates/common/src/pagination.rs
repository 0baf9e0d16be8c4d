//! Pagination utilities
//!
//! The registry API returns full collections; paging happens on the client
//! over the complete result set. `Pagination` normalizes user input and
//! `paginate` slices an in-memory collection into a `Page`.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn new(page: u32, per_page: u32) -> Self { Self { page, per_page } }

    /// Clamp to sane defaults and convert to a zero-based index plus page size
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        ((page - 1) as usize, per_page as usize)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of an in-memory collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page actually returned (clamped to the last page)
    pub page: u32,
    pub per_page: u32,
    pub total_items: usize,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool { self.page < self.total_pages }
    pub fn has_prev(&self) -> bool { self.page > 1 }
}

/// Slice `items` according to `opts`. Requests past the end land on the last page.
pub fn paginate<T: Clone>(items: &[T], opts: Pagination) -> Page<T> {
    let (idx, per_page) = opts.normalize();
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let idx = idx.min(total_pages - 1);
    let start = idx * per_page;
    let end = (start + per_page).min(total_items);
    let slice = if start < end { items[start..end].to_vec() } else { Vec::new() };
    Page {
        items: slice,
        page: (idx + 1) as u32,
        per_page: per_page as u32,
        total_items,
        total_pages: total_pages as u32,
    }
}
