//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog operations.
///
/// The browsing core (pricing, category index, pipeline) is total and never
/// produces these; they come from store mutations, imports and persistence.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A product with the same identifier already exists.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// Unknown sort order string.
    #[error("Invalid sort order: {0} (expected name-asc, name-desc, price-asc or price-desc)")]
    InvalidSortOrder(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// A CSV line could not be turned into a product.
    #[error("Import error on line {line}: {reason}")]
    Import { line: usize, reason: String },

    /// The description source failed for a product.
    #[error("Description generation failed for {id}: {reason}")]
    Description { id: String, reason: String },

    /// The image source failed for a product.
    #[error("Image generation failed for {id}: {reason}")]
    Image { id: String, reason: String },

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error while reading or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
