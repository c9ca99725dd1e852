//! Sale price and profit calculations.
//!
//! All functions are total: a missing product, price or margin counts as 0,
//! and no rounding is applied. Formatting belongs to the display layer.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// Price shown to customers: `price * (1 + margin / 100)`.
pub fn final_price(product: Option<&Product>) -> f64 {
    match product {
        Some(p) => p.base_price() * (1.0 + p.margin_percent() / 100.0),
        None => 0.0,
    }
}

/// Profit per unit: `price * (margin / 100)`.
pub fn profit(product: Option<&Product>) -> f64 {
    match product {
        Some(p) => p.base_price() * (p.margin_percent() / 100.0),
        None => 0.0,
    }
}

/// Profitability figures across a product list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MarginSummary {
    /// Sum of per-unit profit over all products.
    pub total_profit: f64,
    /// Mean margin percentage, counting products without a margin as 0.
    pub average_margin: f64,
    /// Products with a margin above 0.
    pub with_margin: usize,
    /// Products considered.
    pub total: usize,
}

impl MarginSummary {
    /// Summarise a product list.
    pub fn from_products(products: &[Product]) -> Self {
        let total = products.len();
        let total_profit = products.iter().map(|p| profit(Some(p))).sum();
        let margin_sum: f64 = products.iter().map(Product::margin_percent).sum();
        let with_margin = products.iter().filter(|p| p.margin_percent() > 0.0).count();

        let average_margin = if total == 0 {
            0.0
        } else {
            margin_sum / total as f64
        };

        Self {
            total_profit,
            average_margin,
            with_margin,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_price_and_profit() {
        let product = Product::new("P-1", "Cafeteira").with_price(100.0).with_margin(25.0);
        assert_eq!(final_price(Some(&product)), 125.0);
        assert_eq!(profit(Some(&product)), 25.0);
    }

    #[test]
    fn test_missing_fields_count_as_zero() {
        let no_margin = Product::new("P-2", "Liquidificador").with_price(80.0);
        assert_eq!(final_price(Some(&no_margin)), 80.0);
        assert_eq!(profit(Some(&no_margin)), 0.0);

        let no_price = Product::new("P-3", "Brinde").with_margin(50.0);
        assert_eq!(final_price(Some(&no_price)), 0.0);
        assert_eq!(profit(Some(&no_price)), 0.0);
    }

    #[test]
    fn test_absent_product() {
        assert_eq!(final_price(None), 0.0);
        assert_eq!(profit(None), 0.0);
    }

    #[test]
    fn test_no_rounding() {
        let product = Product::new("P-4", "Mouse").with_price(19.99).with_margin(33.0);
        let expected = 19.99 * (1.0 + 33.0 / 100.0);
        assert_eq!(final_price(Some(&product)), expected);
    }

    #[test]
    fn test_margin_summary() {
        let products = vec![
            Product::new("1", "A").with_price(100.0).with_margin(20.0),
            Product::new("2", "B").with_price(50.0).with_margin(10.0),
            Product::new("3", "C").with_price(10.0),
        ];
        let summary = MarginSummary::from_products(&products);
        assert_eq!(summary.total_profit, 25.0);
        assert_eq!(summary.average_margin, 10.0);
        assert_eq!(summary.with_margin, 2);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_margin_summary_empty() {
        assert_eq!(MarginSummary::from_products(&[]), MarginSummary::default());
    }
}
