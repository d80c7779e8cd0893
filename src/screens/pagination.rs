//! Client-side pagination of the subject test list

use std::ops::{Range, RangeInclusive};

/// Tests shown per page
pub const TESTS_PER_PAGE: usize = 5;

/// Page numbers shown at once in the pager
pub const PAGE_WINDOW: usize = 5;

/// One page of an in-memory list
///
/// Pages are 1-based. The current page is always clamped into the valid range,
/// so asking for a page past the end lands on the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    total_items: usize,
    per_page: usize,
    current: usize,
}

impl Pager {
    pub fn new(total_items: usize, requested_page: usize) -> Self {
        Self::with_page_size(total_items, TESTS_PER_PAGE, requested_page)
    }

    pub fn with_page_size(total_items: usize, per_page: usize, requested_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        let current = requested_page.clamp(1, total_pages.max(1));

        Self { total_items, per_page, current }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Whether the list is long enough to need a pager at all
    pub fn is_needed(&self) -> bool {
        self.total_items > self.per_page
    }

    /// Indices of the items on the current page
    pub fn item_range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.item_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// Page numbers to show, centred on the current page where possible
    pub fn window(&self) -> RangeInclusive<usize> {
        let total = self.total_pages();
        if total == 0 {
            return 1..=0;
        }

        let half = PAGE_WINDOW / 2;
        if self.current <= half + 1 {
            1..=PAGE_WINDOW.min(total)
        } else if self.current + half >= total {
            (total + 1).saturating_sub(PAGE_WINDOW).max(1)..=total
        } else {
            self.current - half..=self.current + half
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    pub fn prev(&self) -> Self {
        Self::with_page_size(self.total_items, self.per_page, self.current.saturating_sub(1))
    }

    pub fn next(&self) -> Self {
        Self::with_page_size(self.total_items, self.per_page, self.current + 1)
    }
}
