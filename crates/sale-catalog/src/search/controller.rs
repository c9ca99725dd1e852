//! Browsing state that survives between pipeline runs.

use crate::catalog::{CategoryIndex, Product, ALL};
use crate::search::{pipeline, FilterCriteria, Page, SortOrder};
use serde::{Deserialize, Serialize};

/// Holds the user's criteria and requested page.
///
/// Every criteria change sends the user back to page 1, and picking a new
/// category also clears the subcategory. The product list is never stored
/// here; callers pass the current snapshot into [`page`](Self::page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogController {
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
}

impl Default for CatalogController {
    fn default() -> Self {
        Self::new(pipeline::DEFAULT_PAGE_SIZE)
    }
}

impl CatalogController {
    /// Create a controller on page 1 with default criteria.
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Requested page (1-indexed).
    pub fn requested_page(&self) -> usize {
        self.page
    }

    /// Page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
        self.page = 1;
    }

    /// Select a category; the subcategory goes back to `ALL`.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.criteria.category = category.into();
        self.criteria.subcategory = ALL.to_string();
        self.page = 1;
    }

    pub fn set_subcategory(&mut self, subcategory: impl Into<String>) {
        self.criteria.subcategory = subcategory.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.criteria.sort = sort;
        self.page = 1;
    }

    /// Move to `page` if it lies within `1..=total_pages`.
    ///
    /// Returns whether the page changed.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= 1 && page <= total_pages {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Run the pipeline over `products` with the current state.
    pub fn page<'a>(&self, products: &'a [Product]) -> Page<'a> {
        pipeline::run(products, &self.criteria, self.page_size, self.page)
    }

    /// Run the pipeline and remember the clamped page number, so a list that
    /// shrank under the user does not leave them past the last page.
    pub fn sync_page<'a>(&mut self, products: &'a [Product]) -> Page<'a> {
        let page = self.page(products);
        if page.pagination.total_pages > 0 {
            self.page = page.pagination.page;
        }
        page
    }

    /// Category index for populating filter controls.
    pub fn index(&self, products: &[Product]) -> CategoryIndex {
        CategoryIndex::build(products)
    }

    /// Subcategory options for the current category.
    pub fn subcategory_options(&self, products: &[Product]) -> Vec<String> {
        if !self.criteria.has_category() {
            return vec![ALL.to_string()];
        }
        self.index(products).subcategory_options(&self.criteria.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| {
                let category = if i % 2 == 0 { "Par" } else { "Ímpar" };
                Product::new(format!("P{:02}", i), format!("Produto {:02}", i))
                    .with_category(category, format!("S{}", i % 3))
                    .with_price(i as f64)
            })
            .collect()
    }

    #[test]
    fn test_criteria_changes_reset_page() {
        let items = products(40);
        let mut controller = CatalogController::new(10);
        assert!(controller.set_page(3, 4));

        controller.set_search_term("produto");
        assert_eq!(controller.requested_page(), 1);

        controller.set_page(2, 4);
        controller.set_sort(SortOrder::PriceDesc);
        assert_eq!(controller.requested_page(), 1);

        controller.set_page(2, 4);
        controller.set_subcategory("S1");
        assert_eq!(controller.requested_page(), 1);

        assert_eq!(controller.page(&items).pagination.page, 1);
    }

    #[test]
    fn test_category_change_resets_subcategory_and_page() {
        let mut controller = CatalogController::new(10);
        controller.set_category("Par");
        controller.set_subcategory("S1");
        controller.set_page(2, 2);

        controller.set_category("Ímpar");
        assert_eq!(controller.criteria().subcategory, ALL);
        assert_eq!(controller.requested_page(), 1);
    }

    #[test]
    fn test_set_page_rejects_out_of_range() {
        let mut controller = CatalogController::new(10);
        assert!(!controller.set_page(0, 3));
        assert!(!controller.set_page(4, 3));
        assert!(controller.set_page(3, 3));
        assert_eq!(controller.requested_page(), 3);
    }

    #[test]
    fn test_sync_page_clamps_after_shrink() {
        let mut controller = CatalogController::new(10);
        controller.set_page(4, 4);

        let shrunk = products(15);
        let page = controller.sync_page(&shrunk);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(controller.requested_page(), 2);
        assert_eq!(page.len(), 5);
    }

    #[test]
    fn test_subcategory_options_follow_category() {
        let items = products(6);
        let mut controller = CatalogController::default();
        assert_eq!(controller.subcategory_options(&items), vec!["Todas"]);

        controller.set_category("Par");
        assert_eq!(controller.subcategory_options(&items), vec!["Todas", "S0", "S1", "S2"]);
    }
}
