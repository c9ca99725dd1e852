//! Shopping cart module.
//!
//! Contains the cart, its pricing breakdown and the favorites list.

mod cart;
mod favorites;
mod pricing;

pub use cart::{Cart, CartLine, MAX_QUANTITY_PER_ITEM};
pub use favorites::Favorites;
pub use pricing::{CartPricing, LinePricing};
