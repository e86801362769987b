//! Fixed-size, 1-based pagination.

use std::ops::Range;

/// Number of notes shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start on page 1. A zero page size is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(item_count / page_size)`
    #[must_use]
    pub const fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size)
    }

    /// Offsets visible on the current page, clipped to `item_count`.
    ///
    /// A page past the end yields an empty range.
    #[must_use]
    pub fn visible_range(&self, item_count: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(item_count);
        let end = start.saturating_add(self.page_size).min(item_count);
        start..end
    }

    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn can_go_next(&self, item_count: usize) -> bool {
        self.page < self.total_pages(item_count)
    }

    /// Move back one page, stopping at 1. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Move forward one page, stopping at the last page.
    pub fn next(&mut self, item_count: usize) -> bool {
        if !self.can_go_next(item_count) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Jump to `page`, clamped to `1..=max(total_pages, 1)`.
    pub fn go_to(&mut self, page: usize, item_count: usize) {
        let last = self.total_pages(item_count).max(1);
        self.page = page.clamp(1, last);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let pagination = Pagination::new(10);
        assert_eq!(pagination.total_pages(0), 0);
        assert_eq!(pagination.total_pages(10), 1);
        assert_eq!(pagination.total_pages(25), 3);
    }

    #[test]
    fn last_page_holds_remainder_and_next_stops() {
        let mut pagination = Pagination::new(10);
        assert!(pagination.next(25));
        assert!(pagination.next(25));
        assert_eq!(pagination.page(), 3);
        assert_eq!(pagination.visible_range(25).len(), 5);

        assert!(!pagination.next(25));
        assert_eq!(pagination.page(), 3);
    }

    #[test]
    fn previous_stops_at_first_page() {
        let mut pagination = Pagination::new(10);
        assert!(!pagination.can_go_previous());
        assert!(!pagination.previous());
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn next_disabled_without_items() {
        let mut pagination = Pagination::new(10);
        assert!(!pagination.can_go_next(0));
        assert!(!pagination.next(0));
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn page_past_end_renders_empty() {
        let mut pagination = Pagination::new(10);
        pagination.go_to(3, 25);
        assert_eq!(pagination.page(), 3);

        // The filtered set shrank underneath the current page.
        assert!(pagination.visible_range(4).is_empty());
        assert!(!pagination.can_go_next(4));
        assert!(pagination.can_go_previous());
    }

    #[test]
    fn go_to_clamps() {
        let mut pagination = Pagination::new(10);
        pagination.go_to(9, 25);
        assert_eq!(pagination.page(), 3);
        pagination.go_to(0, 25);
        assert_eq!(pagination.page(), 1);
        pagination.go_to(4, 0);
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn zero_page_size_is_one() {
        assert_eq!(Pagination::new(0).page_size(), 1);
    }
}
