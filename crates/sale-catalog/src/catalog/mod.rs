//! Product catalog module.
//!
//! Contains the product type, the derived category index, category cleaning
//! for imports and the in-memory product store used by the admin back-office.

mod category;
pub mod classify;
mod product;
mod store;

pub use category::{CategoryIndex, ALL};
pub use product::Product;
pub use store::{image_prompt, DescriptionSource, ImageSource, ImportSummary, ProductStore};
