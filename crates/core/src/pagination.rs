//! Client-local pagination over a fully materialized list.
//!
//! The window is a pure function of `(list, page_number, page_size)`; the only
//! state kept between calls is the page number in [`Pagination`].

use serde::Serialize;

use crate::constants::DEFAULT_PAGE_SIZE;

/// Bounded slice of a list currently visible, plus pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageWindow<'a, T> {
    /// Items on the current page, at most `page_size` of them.
    pub items: &'a [T],
    /// 1-based, always within `[1, max(1, total_pages)]`.
    pub page_number: usize,
    /// `0` when the list is empty.
    pub total_pages: usize,
}

impl<T> PageWindow<'_, T> {
    /// The list has no items at all (as opposed to a page past the end).
    #[must_use]
    pub const fn is_empty_history(&self) -> bool {
        self.total_pages == 0
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}

/// `ceil(len / page_size)`. A zero page size is treated as one.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = if page_size == 0 { 1 } else { page_size };
    len.div_ceil(page_size)
}

/// Saturate any requested page into `[1, max(1, total_pages)]`.
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let upper = total_pages.max(1);
    if requested < 1 {
        return 1;
    }
    usize::try_from(requested).map_or(upper, |page| page.min(upper))
}

/// Derive the visible window for `page_number` (clamped) over `list`.
#[must_use]
pub fn current_window<T>(list: &[T], page_number: usize, page_size: usize) -> PageWindow<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(list.len(), page_size);
    let page_number = page_number.clamp(1, total.max(1));
    let start = (page_number - 1).saturating_mul(page_size).min(list.len());
    let end = start.saturating_add(page_size).min(list.len());
    PageWindow { items: list.get(start..end).unwrap_or_default(), page_number, total_pages: total }
}

/// Page-number state with navigation.
///
/// The list itself is not held here; every method takes the current length so
/// the page number can be clamped whenever the list changes.
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
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1) }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to page `n`, saturating at the bounds. Returns the resulting page.
    pub fn set_page(&mut self, n: i64, list_len: usize) -> usize {
        self.page = clamp_page(n, total_pages(list_len, self.page_size));
        self.page
    }

    pub fn next_page(&mut self, list_len: usize) -> usize {
        let target = i64::try_from(self.page.saturating_add(1)).unwrap_or(i64::MAX);
        self.set_page(target, list_len)
    }

    pub fn previous_page(&mut self, list_len: usize) -> usize {
        let target = i64::try_from(self.page).unwrap_or(i64::MAX).saturating_sub(1);
        self.set_page(target, list_len)
    }

    /// Clamp the current page down after the list changed length.
    pub fn reclamp(&mut self, list_len: usize) -> usize {
        let upper = total_pages(list_len, self.page_size).max(1);
        if self.page > upper {
            tracing::debug!(from = self.page, to = upper, "page clamped after list shrank");
            self.page = upper;
        }
        self.page
    }

    #[must_use]
    pub fn window<'a, T>(&self, list: &'a [T]) -> PageWindow<'a, T> {
        current_window(list, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(len: usize) -> Vec<usize> {
        (0..len).collect()
    }

    #[test]
    fn test_seventeen_items_page_size_eight() {
        let items = list(17);
        assert_eq!(total_pages(items.len(), 8), 3);

        let first = current_window(&items, 1, 8);
        assert_eq!(first.items.len(), 8);
        assert_eq!(first.items.first(), Some(&0));
        assert_eq!(first.total_pages, 3);

        let third = current_window(&items, 3, 8);
        assert_eq!(third.items, &[16]);
        assert!(!third.has_next());
        assert!(third.has_previous());
    }

    #[test]
    fn test_empty_list_has_zero_pages() {
        let items: Vec<usize> = Vec::new();
        let window = current_window(&items, 1, 8);
        assert_eq!(window.total_pages, 0);
        assert_eq!(window.page_number, 1);
        assert!(window.items.is_empty());
        assert!(window.is_empty_history());
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(total_pages(16, 8), 2);
        assert_eq!(total_pages(1, 8), 1);
        assert_eq!(total_pages(0, 8), 0);
    }

    #[test]
    fn test_set_page_saturates_for_any_integer() {
        let mut pagination = Pagination::new(8);
        for (requested, expected) in
            [(i64::MIN, 1), (-5, 1), (0, 1), (1, 1), (2, 2), (3, 3), (4, 3), (i64::MAX, 3)]
        {
            assert_eq!(pagination.set_page(requested, 17), expected, "requested {requested}");
        }
    }

    #[test]
    fn test_set_page_on_empty_list_stays_on_one() {
        let mut pagination = Pagination::new(8);
        assert_eq!(pagination.set_page(7, 0), 1);
    }

    #[test]
    fn test_page_invariant_holds_for_range_of_lengths() {
        for len in 0..40 {
            for requested in -3..8 {
                let mut pagination = Pagination::new(8);
                let page = pagination.set_page(requested, len);
                let total = total_pages(len, 8);
                assert!(page >= 1 && page <= total.max(1), "len {len} requested {requested}");
                let items = list(len);
                assert!(pagination.window(&items).items.len() <= 8);
            }
        }
    }

    #[test]
    fn test_reclamp_after_shrink() {
        let mut pagination = Pagination::new(8);
        pagination.set_page(3, 17);
        assert_eq!(pagination.reclamp(17), 3);
        assert_eq!(pagination.reclamp(9), 2);
        assert_eq!(pagination.reclamp(0), 1);
    }

    #[test]
    fn test_reclamp_does_not_move_up() {
        let mut pagination = Pagination::new(8);
        pagination.set_page(2, 17);
        assert_eq!(pagination.reclamp(100), 2);
    }

    #[test]
    fn test_next_and_previous() {
        let mut pagination = Pagination::new(8);
        assert_eq!(pagination.previous_page(17), 1);
        assert_eq!(pagination.next_page(17), 2);
        assert_eq!(pagination.next_page(17), 3);
        assert_eq!(pagination.next_page(17), 3);
        assert_eq!(pagination.previous_page(17), 2);
    }

    #[test]
    fn test_window_clamps_stale_page_number() {
        let items = list(5);
        let window = current_window(&items, 9, 8);
        assert_eq!(window.page_number, 1);
        assert_eq!(window.items.len(), 5);
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        assert_eq!(Pagination::new(0).page_size(), 1);
        assert_eq!(total_pages(3, 0), 3);
    }
}
