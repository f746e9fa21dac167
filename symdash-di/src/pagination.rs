//! Pagination utilities for symdash-di view lists
//!
//! [REQ-DI-F-090]: Paginated browsing (50 rows/page)

/// Page size constant for all view pagination
pub const PAGE_SIZE: i64 = 50;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Offset of the first row on the page
    pub offset: i64,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
pub fn calculate_pagination(total_results: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_results + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Slice one page out of an in-memory result set
pub fn page_slice<T>(items: &[T], requested_page: i64) -> (&[T], Pagination) {
    let p = calculate_pagination(items.len() as i64, requested_page);
    let start = (p.offset as usize).min(items.len());
    let end = (start + PAGE_SIZE as usize).min(items.len());
    (&items[start..end], p)
}
