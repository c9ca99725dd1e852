//! Filter criteria and sort orders.

use std::fmt;
use std::str::FromStr;

use crate::catalog::ALL;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Sort by name A-Z.
    #[default]
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by base price, low to high.
    PriceAsc,
    /// Sort by base price, high to low.
    PriceDesc,
}

impl SortOrder {
    /// All sort orders, in the order they are offered to users.
    pub const VARIANTS: [SortOrder; 4] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
    ];

    /// Wire name (e.g. `"price-asc"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "Nome: A-Z",
            SortOrder::NameDesc => "Nome: Z-A",
            SortOrder::PriceAsc => "Preço: menor para maior",
            SortOrder::PriceDesc => "Preço: maior para menor",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            _ => Err(CatalogError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// User-selected criteria for a catalog listing.
///
/// `category` and `subcategory` hold [`ALL`] when unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against product names.
    pub search_term: String,
    /// Exact category, or `ALL`.
    pub category: String,
    /// Exact subcategory, or `ALL`. Ignored while `category` is `ALL`.
    pub subcategory: String,
    /// Sort order.
    pub sort: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL.to_string(),
            subcategory: ALL.to_string(),
            sort: SortOrder::default(),
        }
    }
}

impl FilterCriteria {
    /// Criteria that keep every product, sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Select a category. The subcategory goes back to `ALL`.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self.subcategory = ALL.to_string();
        self
    }

    /// Select a subcategory.
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    /// Set the sort order.
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a category filter is active.
    pub fn has_category(&self) -> bool {
        self.category != ALL
    }

    /// Whether a subcategory filter is active. Only true alongside a
    /// category filter.
    pub fn has_subcategory(&self) -> bool {
        self.has_category() && self.subcategory != ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!(" NAME-DESC ".parse::<SortOrder>().unwrap(), SortOrder::NameDesc);
        assert!(matches!(
            "relevance".parse::<SortOrder>(),
            Err(CatalogError::InvalidSortOrder(_))
        ));
        for order in SortOrder::VARIANTS {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
    }

    #[test]
    fn test_sort_order_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&SortOrder::PriceDesc).unwrap(), "\"price-desc\"");
    }

    #[test]
    fn test_criteria_builder() {
        let criteria = FilterCriteria::new()
            .with_search("fone")
            .with_category("Eletrônicos")
            .with_subcategory("Áudio")
            .with_sort(SortOrder::PriceAsc);

        assert_eq!(criteria.search_term, "fone");
        assert!(criteria.has_category());
        assert!(criteria.has_subcategory());
        assert_eq!(criteria.sort, SortOrder::PriceAsc);
    }

    #[test]
    fn test_with_category_resets_subcategory() {
        let criteria = FilterCriteria::new()
            .with_category("A")
            .with_subcategory("x")
            .with_category("B");
        assert_eq!(criteria.subcategory, ALL);
    }

    #[test]
    fn test_subcategory_needs_category() {
        let criteria = FilterCriteria::new().with_subcategory("x");
        assert!(!criteria.has_category());
        assert!(!criteria.has_subcategory());
    }
}
