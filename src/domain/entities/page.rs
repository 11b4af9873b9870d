//! Pagination state for the gallery.

/// Snapshot of the gallery's pagination state.
///
/// `current_page` is always within `[1, total_pages]`. While `is_loading`
/// is set, navigation requests are dropped, so at most one page transition
/// is in flight at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// The page currently shown (1-based).
    pub current_page: usize,
    /// Number of locators per page.
    pub page_size: usize,
    /// Total number of pages in the catalog at this page size.
    pub total_pages: usize,
    /// True while a page transition is in flight.
    pub is_loading: bool,
}

impl PaginationState {
    /// Returns true if a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns true if a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_pages() {
        let first = PaginationState {
            current_page: 1,
            page_size: 12,
            total_pages: 156,
            is_loading: false,
        };
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = PaginationState {
            current_page: 156,
            ..first
        };
        assert!(!last.has_next());
        assert!(last.has_previous());
    }
}
