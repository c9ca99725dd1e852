//! Result pages and pagination metadata.

use crate::catalog::Product;
use serde::Serialize;

/// Pagination info for one page of results.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed, already clamped).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items after filtering.
    pub total: usize,
    /// Total number of pages; 0 when there are no items.
    pub total_pages: usize,
}

impl Pagination {
    /// Compute pagination for `total` items, clamping `requested` into range.
    ///
    /// A `per_page` of 0 is treated as 1 and a requested page of 0 as page 1.
    pub fn new(requested: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);
        let page = requested.max(1).min(total_pages.max(1));

        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }
}

/// One page of filtered, sorted products.
///
/// Items borrow from the product slice the pipeline was given.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<'a> {
    /// Products on this page, in display order.
    pub items: Vec<&'a Product>,
    /// Pagination info.
    pub pagination: Pagination,
}

impl<'a> Page<'a> {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Clone the items into owned products.
    pub fn to_owned_items(&self) -> Vec<Product> {
        self.items.iter().map(|p| (*p).clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next());
        assert!(p.has_prev());
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_clamps_past_last_page() {
        let p = Pagination::new(9, 10, 45);
        assert_eq!(p.page, 5);
        assert!(!p.has_next());
    }

    #[test]
    fn test_pagination_page_zero_is_first() {
        let p = Pagination::new(0, 10, 45);
        assert_eq!(p.page, 1);
        assert!(!p.has_prev());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(3, 15, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
        assert!(!p.has_next());
        assert!(p.page_numbers(5).is_empty());
    }

    #[test]
    fn test_pagination_zero_page_size() {
        let p = Pagination::new(1, 0, 3);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let p = Pagination::new(1, 10, 100);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let p = Pagination::new(10, 10, 100);
        assert_eq!(p.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 15, 16);
        assert_eq!(p.start_item(), 16);
        assert_eq!(p.end_item(), 16);
    }
}
