//! Product type.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Image hosts that serve stand-in pictures rather than product photos.
const PLACEHOLDER_IMAGE_HOSTS: &[&str] = &["via.placeholder.com", "placehold.co"];

/// A product in the sale catalog.
///
/// Numeric fields are optional because imported and hand-entered records
/// are not always complete; consumers treat a missing price or margin as 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier (the SKU).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Top-level category. Empty when uncategorised.
    #[serde(default)]
    pub category: String,
    /// Subcategory within `category`.
    #[serde(default)]
    pub subcategory: String,
    /// Supplier/vendor name.
    #[serde(default)]
    pub vendor: String,
    /// Base cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Margin percentage applied on top of `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    /// Marketing description. May be empty while generation is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// External purchase URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,
}

impl Product {
    /// Create a product with just an identifier and a name.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set category and subcategory.
    pub fn with_category(
        mut self,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        self.category = category.into();
        self.subcategory = subcategory.into();
        self
    }

    /// Set the base price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the margin percentage.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Set the vendor.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Base price, with a missing value read as 0.
    pub fn base_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Margin percentage, with a missing value read as 0.
    pub fn margin_percent(&self) -> f64 {
        self.margin.unwrap_or(0.0)
    }

    /// Whether the product has a non-blank description.
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }

    /// Whether the product has a real image, not a blank or placeholder URL.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .map(str::trim)
            .is_some_and(|u| !u.is_empty() && !PLACEHOLDER_IMAGE_HOSTS.iter().any(|h| u.contains(h)))
    }

    /// Check the record against the catalog invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("product id must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err(format!("product {} has no name", self.id));
        }
        match self.price {
            Some(p) if !p.is_finite() || p < 0.0 => {
                return Err(format!("product {} has invalid price {}", self.id, p));
            }
            _ => {}
        }
        match self.margin {
            Some(m) if !m.is_finite() || m < 0.0 => {
                return Err(format!("product {} has invalid margin {}", self.id, m));
            }
            _ => {}
        }
        Ok(())
    }
}
