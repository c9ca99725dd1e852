//! Catalog logic for a promotional sale event.
//!
//! This crate provides the browsing and back-office pieces of a sale
//! catalog:
//!
//! - **Catalog**: products, the category/subcategory index, the product store
//! - **Pricing**: sale price and profit from base cost and margin
//! - **Search**: filter criteria, the filter/sort/paginate pipeline, controller
//! - **Cart**: cart lines, cart pricing, favorites
//! - **Import/Snapshot**: CSV import and JSON persistence
//!
//! # Example
//!
//! ```rust
//! use sale_catalog::prelude::*;
//!
//! let products = vec![
//!     Product::new("BF-001", "Fone Bluetooth")
//!         .with_category("Eletrônicos", "Áudio")
//!         .with_price(100.0)
//!         .with_margin(25.0),
//!     Product::new("BF-002", "Air Fryer")
//!         .with_category("Casa e Cozinha", "Eletroportáteis")
//!         .with_price(400.0),
//! ];
//!
//! let criteria = FilterCriteria::new().with_category("Eletrônicos");
//! let page = search::run(&products, &criteria, DEFAULT_PAGE_SIZE, 1);
//!
//! assert_eq!(page.pagination.total, 1);
//! assert_eq!(final_price(page.items.first().copied()), 125.0);
//! ```

pub mod collate;
pub mod error;
pub mod ids;
pub mod import;
pub mod pricing;
pub mod snapshot;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{
        CategoryIndex, DescriptionSource, ImageSource, ImportSummary, Product, ProductStore, ALL,
    };

    // Pricing
    pub use crate::pricing::{final_price, profit, MarginSummary};

    // Search
    pub use crate::search::{
        self, CatalogController, FilterCriteria, Page, Pagination, SortOrder, DEFAULT_PAGE_SIZE,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, Favorites, LinePricing};

    // Import and persistence
    pub use crate::import::{parse_products_csv, ImportOptions, ImportReport};
    pub use crate::snapshot::Snapshot;
}
