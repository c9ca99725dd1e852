//! Whole-catalog persistence as a single JSON document.

use std::fs;
use std::path::Path;

use crate::cart::{Cart, Favorites};
use crate::catalog::{Product, ProductStore};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Products, cart and favorites saved together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub store: ProductStore,
    pub cart: Cart,
    pub favorites: Favorites,
}

/// On-disk layout. Products go through `ProductStore::from_products` on load
/// so a hand-edited file cannot smuggle in duplicates.
#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    cart: Cart,
    #[serde(default)]
    favorites: Favorites,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Ok(Self {
            store: ProductStore::from_products(file.products)?,
            cart: file.cart,
            favorites: file.favorites,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let file = SnapshotFile {
            products: self.store.products().to_vec(),
            cart: self.cart.clone(),
            favorites: self.favorites.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load from `path`. A missing file yields an empty snapshot.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot file, starting empty");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!(path = %path.display(), products = snapshot.store.len(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), products = self.store.len(), "snapshot saved");
        Ok(())
    }
}
