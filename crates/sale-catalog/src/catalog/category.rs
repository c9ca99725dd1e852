//! Category and subcategory index derived from the product list.

use std::collections::HashMap;

use crate::catalog::Product;
use crate::collate;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// Sentinel value meaning "no filter" for category and subcategory selects.
pub const ALL: &str = "Todas";

/// Distinct categories and, per category, distinct subcategories.
///
/// The index is a view over one snapshot of the product list. It holds no
/// reference to the products, so rebuild it whenever the list changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    /// `ALL` followed by the sorted distinct categories.
    categories: Vec<String>,
    /// Sorted distinct subcategories per category.
    subcategories: HashMap<String, Vec<String>>,
}

impl CategoryIndex {
    /// Build the index from a product snapshot.
    ///
    /// Products with an empty category are ignored; empty subcategories are
    /// not listed.
    pub fn build(products: &[Product]) -> Self {
        let mut subcategories: HashMap<String, Vec<String>> = HashMap::new();

        for product in products {
            if product.category.is_empty() {
                continue;
            }
            let entry = subcategories.entry(product.category.clone()).or_default();
            if !product.subcategory.is_empty() && !entry.contains(&product.subcategory) {
                entry.push(product.subcategory.clone());
            }
        }

        for subs in subcategories.values_mut() {
            subs.sort_by(|a, b| collate::compare(a, b));
        }

        let mut names: Vec<String> = subcategories.keys().cloned().collect();
        names.sort_by(|a, b| collate::compare(a, b));

        let mut categories = Vec::with_capacity(names.len() + 1);
        categories.push(ALL.to_string());
        categories.extend(names);

        Self {
            categories,
            subcategories,
        }
    }

    /// Category options, `ALL` first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Subcategories observed for `category`, without the sentinel.
    ///
    /// Empty for `ALL` and for unknown categories.
    pub fn subcategories(&self, category: &str) -> &[String] {
        self.subcategories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Subcategory options for a select control: `ALL` then the subcategories
    /// of `category`.
    pub fn subcategory_options(&self, category: &str) -> Vec<String> {
        std::iter::once(ALL.to_string())
            .chain(self.subcategories(category).iter().cloned())
            .collect()
    }

    /// Whether `category` (and `subcategory`, unless it is `ALL`) are known.
    pub fn contains(&self, category: &str, subcategory: &str) -> bool {
        if category == ALL {
            return subcategory == ALL;
        }
        match self.subcategories.get(category) {
            Some(subs) => subcategory == ALL || subs.iter().any(|s| s == subcategory),
            None => false,
        }
    }

    /// Number of real categories (sentinel excluded).
    pub fn len(&self) -> usize {
        self.categories.len() - 1
    }

    /// Whether no product carries a category.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Subcategories keyed in category order so the output is stable.
struct OrderedSubcategories<'a>(&'a CategoryIndex);

impl Serialize for OrderedSubcategories<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let index = self.0;
        let mut map = serializer.serialize_map(Some(index.len()))?;
        for category in index.categories.iter().skip(1) {
            map.serialize_entry(category, index.subcategories(category))?;
        }
        map.end()
    }
}

impl Serialize for CategoryIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CategoryIndex", 2)?;
        state.serialize_field("categories", &self.categories)?;
        state.serialize_field("subcategories", &OrderedSubcategories(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, subcategory: &str) -> Product {
        Product::new(id, format!("Produto {}", id)).with_category(category, subcategory)
    }

    #[test]
    fn test_index_sorted_with_sentinel_first() {
        let products = vec![
            product("1", "Games", "Consoles"),
            product("2", "Acessórios", "Bolsas"),
            product("3", "Eletrônicos", "Áudio"),
            product("4", "Eletrônicos", "Laptops"),
            product("5", "Games", "Consoles"),
        ];
        let index = CategoryIndex::build(&products);

        assert_eq!(
            index.categories(),
            &["Todas", "Acessórios", "Eletrônicos", "Games"]
        );
        assert_eq!(index.subcategories("Eletrônicos"), &["Áudio", "Laptops"]);
        assert_eq!(index.subcategories("Games"), &["Consoles"]);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_empty_category_is_ignored() {
        let products = vec![product("1", "", "Solta"), product("2", "Casa", "")];
        let index = CategoryIndex::build(&products);

        assert_eq!(index.categories(), &["Todas", "Casa"]);
        assert!(index.subcategories("Casa").is_empty());
        assert!(index.subcategories("").is_empty());
    }

    #[test]
    fn test_subcategory_options() {
        let index = CategoryIndex::build(&[product("1", "A", "x")]);
        assert_eq!(index.subcategory_options(ALL), vec!["Todas"]);
        assert_eq!(index.subcategory_options("A"), vec!["Todas", "x"]);
        assert_eq!(index.subcategory_options("missing"), vec!["Todas"]);
    }

    #[test]
    fn test_contains() {
        let index = CategoryIndex::build(&[product("1", "A", "x"), product("2", "B", "z")]);
        assert!(index.contains(ALL, ALL));
        assert!(!index.contains(ALL, "x"));
        assert!(index.contains("A", ALL));
        assert!(index.contains("A", "x"));
        assert!(!index.contains("A", "z"));
        assert!(!index.contains("C", ALL));
    }

    #[test]
    fn test_empty_collection() {
        let index = CategoryIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.categories(), &["Todas"]);
    }

    #[test]
    fn test_serializes_subcategories_in_category_order() {
        let products = vec![
            product("1", "Games", "Consoles"),
            product("2", "Casa", "Cozinha"),
            product("3", "Áudio", "Fones"),
            product("4", "Beleza", ""),
        ];
        let json = serde_json::to_string(&CategoryIndex::build(&products)).unwrap();
        assert_eq!(
            json,
            r#"{"categories":["Todas","Áudio","Beleza","Casa","Games"],"subcategories":{"Áudio":["Fones"],"Beleza":[],"Casa":["Cozinha"],"Games":["Consoles"]}}"#
        );
    }
}
