//! Product identifier.
//!
//! Products are keyed by their SKU, a plain string wrapped in a newtype to
//! keep it apart from names and categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A product identifier (the SKU).
///
/// Surrounding whitespace is trimmed on construction and on deserialization,
/// so hand-edited snapshots match ids typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string. Surrounding whitespace is trimmed.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.len() == id.len() {
            Self(id)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("BF-0001");
        assert_eq!(id.as_str(), "BF-0001");
    }

    #[test]
    fn test_id_trims_whitespace() {
        let id = ProductId::new("  BF-0002 \n");
        assert_eq!(id.as_str(), "BF-0002");
    }

    #[test]
    fn test_id_display_and_equality() {
        let a: ProductId = "same".into();
        let b = ProductId::new(String::from("same"));
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), "same");
        assert_ne!(a, ProductId::new("other"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ProductId::new("SKU-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"SKU-9\"");
    }

    #[test]
    fn test_id_deserialization_trims() {
        let id: ProductId = serde_json::from_str(r#"" BF-0003\t""#).unwrap();
        assert_eq!(id, ProductId::new("BF-0003"));
    }
}
