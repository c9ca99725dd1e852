//! Per-product predicates used by the pipeline's filter steps.

use crate::catalog::{Product, ALL};

/// Case-insensitive substring match on the product name.
///
/// `needle` must already be lowercase; an empty needle matches everything.
pub fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty() || product.name.to_lowercase().contains(needle)
}

/// Exact category match, with `ALL` matching everything.
pub fn matches_category(product: &Product, category: &str) -> bool {
    category == ALL || product.category == category
}

/// Exact subcategory match, with `ALL` matching everything.
pub fn matches_subcategory(product: &Product, subcategory: &str) -> bool {
    subcategory == ALL || product.subcategory == subcategory
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let product = Product::new("1", "Smart TV 55\" QLED");
        assert!(matches_search(&product, "tv"));
        assert!(matches_search(&product, "qled"));
        assert!(matches_search(&product, ""));
        assert!(!matches_search(&product, "oled 65"));
    }

    #[test]
    fn test_category_is_exact() {
        let product = Product::new("1", "X").with_category("Games", "Consoles");
        assert!(matches_category(&product, ALL));
        assert!(matches_category(&product, "Games"));
        assert!(!matches_category(&product, "games"));
        assert!(!matches_category(&product, "Game"));
    }

    #[test]
    fn test_subcategory_is_exact() {
        let product = Product::new("1", "X").with_category("Games", "Consoles");
        assert!(matches_subcategory(&product, ALL));
        assert!(matches_subcategory(&product, "Consoles"));
        assert!(!matches_subcategory(&product, "Controles"));
    }
}
