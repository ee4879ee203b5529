//! Client-side pagination for the recent sales listing

use serde::Serialize;

/// One page of a fetched listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: usize,
    pub per_page: usize,
    /// Rows across all pages
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

/// Slice `items` into page `page` of size `per_page`
///
/// Out-of-range pages are empty; `per_page == 0` is treated as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);
    let start = page.saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total,
        total_pages,
    }
}
