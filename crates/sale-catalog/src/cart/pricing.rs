//! Cart pricing calculations.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart against a product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
    /// Sum of line totals.
    pub grand_total: f64,
    /// Cart lines whose product is no longer in the catalog.
    pub missing: Vec<ProductId>,
}

impl CartPricing {
    /// Total number of units across priced lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Whether some lines could not be priced.
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Category (denormalized for export).
    pub category: String,
    /// Unit sale price (base price with margin).
    pub unit_price: f64,
    /// Quantity.
    pub quantity: i64,
    /// Line total (unit_price * quantity).
    pub total: f64,
}
