//! Favorite products.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Ordered set of favorited product ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    ids: Vec<ProductId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove `id`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(pos) = self.ids.iter().position(|f| f == &id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorites that still exist in `products`, in favoriting order.
    pub fn resolve<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        self.ids
            .iter()
            .filter_map(|id| products.iter().find(|p| &p.id == id))
            .collect()
    }

    /// Drop ids that no longer exist in `products`. Returns how many were removed.
    pub fn prune(&mut self, products: &[Product]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| products.iter().any(|p| &p.id == id));
        before - self.ids.len()
    }
}
