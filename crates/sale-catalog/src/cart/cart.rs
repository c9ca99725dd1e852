//! Cart and cart lines.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::Product;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::pricing::final_price;
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Header row of the cart CSV export.
const EXPORT_HEADER: &str = "ID,Nome,Categoria,Preço,Quantidade,Preço Total";

/// A shopping cart.
///
/// Lines only reference products by id; prices are resolved against the
/// product snapshot at pricing time so margin changes show up immediately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Lines in the order they were first added.
    pub lines: Vec<CartLine>,
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity.
    pub quantity: i64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product, merging with an existing line.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The line would exceed MAX_QUANTITY_PER_ITEM
    pub fn add(&mut self, product_id: ProductId, quantity: i64) -> Result<i64, CatalogError> {
        if quantity <= 0 {
            return Err(CatalogError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            let new_quantity = existing.quantity.saturating_add(quantity);
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CatalogError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            return Ok(new_quantity);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CatalogError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        self.lines.push(CartLine {
            product_id,
            quantity,
        });
        Ok(quantity)
    }

    /// Set a line's quantity.
    ///
    /// If quantity is <= 0, removes the line. Returns whether a line was
    /// found.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Result<bool, CatalogError> {
        if quantity <= 0 {
            return Ok(self.remove(product_id));
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CatalogError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        match self.lines.iter_mut().find(|l| &l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() < len_before
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of a product in the cart, 0 if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.lines
            .iter()
            .find(|l| &l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Price every line against `products` using sale prices.
    pub fn calculate_pricing(&self, products: &[Product]) -> CartPricing {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut missing = Vec::new();

        for line in &self.lines {
            match products.iter().find(|p| p.id == line.product_id) {
                Some(product) => {
                    let unit_price = final_price(Some(product));
                    lines.push(LinePricing {
                        product_id: line.product_id.clone(),
                        name: product.name.clone(),
                        category: product.category.clone(),
                        unit_price,
                        quantity: line.quantity,
                        total: unit_price * line.quantity as f64,
                    });
                }
                None => missing.push(line.product_id.clone()),
            }
        }

        let grand_total = lines.iter().map(|l| l.total).sum();

        CartPricing {
            lines,
            grand_total,
            missing,
        }
    }

    /// Render the priced cart as CSV, one row per line.
    pub fn export_csv(&self, products: &[Product]) -> String {
        let pricing = self.calculate_pricing(products);
        let mut out = String::from(EXPORT_HEADER);

        for line in &pricing.lines {
            out.push('\n');
            out.push_str(&format!(
                "{},{},{},{:.2},{},{:.2}",
                quote_field(line.product_id.as_str()),
                quote_field(&line.name),
                quote_field(&line.category),
                line.unit_price,
                line.quantity,
                line.total
            ));
        }

        out
    }
}

/// Wrap a text field in double quotes, doubling any quote inside it.
fn quote_field(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new("A", "Fone \"Pro\"").with_category("Eletrônicos", "Áudio").with_price(100.0).with_margin(25.0),
            Product::new("B", "Panela").with_category("Casa", "Cozinha").with_price(40.0),
        ]
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 1).unwrap();
        cart.add(ProductId::new("A"), 2).unwrap();
        cart.add(ProductId::new("B"), 1).unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.quantity_of(&ProductId::new("A")), 3);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_invalid_quantities() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add(ProductId::new("A"), 0),
            Err(CatalogError::InvalidQuantity(0))
        ));
        assert!(cart.add(ProductId::new("A"), MAX_QUANTITY_PER_ITEM + 1).is_err());

        cart.add(ProductId::new("A"), MAX_QUANTITY_PER_ITEM).unwrap();
        assert!(cart.add(ProductId::new("A"), 1).is_err());
        assert_eq!(cart.quantity_of(&ProductId::new("A")), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 2).unwrap();
        assert!(cart.set_quantity(&ProductId::new("A"), 5).unwrap());
        assert_eq!(cart.item_count(), 5);

        assert!(cart.set_quantity(&ProductId::new("A"), 0).unwrap());
        assert!(cart.is_empty());
        assert!(!cart.set_quantity(&ProductId::new("A"), 3).unwrap());
    }

    #[test]
    fn test_pricing_uses_sale_price() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 2).unwrap();
        cart.add(ProductId::new("B"), 1).unwrap();
        cart.add(ProductId::new("gone"), 1).unwrap();

        let pricing = cart.calculate_pricing(&products());
        assert_eq!(pricing.lines[0].unit_price, 125.0);
        assert_eq!(pricing.lines[0].total, 250.0);
        assert_eq!(pricing.grand_total, 290.0);
        assert_eq!(pricing.item_count(), 3);
        assert_eq!(pricing.missing, vec![ProductId::new("gone")]);
    }

    #[test]
    fn test_export_csv() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 2).unwrap();
        cart.add(ProductId::new("B"), 1).unwrap();

        let csv = cart.export_csv(&products());
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[0], "ID,Nome,Categoria,Preço,Quantidade,Preço Total");
        assert_eq!(rows[1], "\"A\",\"Fone \"\"Pro\"\"\",\"Eletrônicos\",125.00,2,250.00");
        assert_eq!(rows[2], "\"B\",\"Panela\",\"Casa\",40.00,1,40.00");
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 1).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_export_quotes_category_with_commas() {
        let products = vec![Product::new("A", "Toalha")
            .with_category("Cama, Mesa e Banho", "Toalhas")
            .with_price(10.0)];
        let mut cart = Cart::new();
        cart.add(ProductId::new("A"), 1).unwrap();

        let csv = cart.export_csv(&products);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"A\",\"Toalha\",\"Cama, Mesa e Banho\",10.00,1,10.00");

        let fields = crate::import::split_record(row);
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[2], "Cama, Mesa e Banho");
    }
}
