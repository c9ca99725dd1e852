//! Search module.
//!
//! Filter criteria, the filter/sort/paginate pipeline and the controller
//! that keeps criteria and page number consistent between calls.

mod controller;
mod filter;
mod pipeline;
mod query;
mod results;

pub use controller::CatalogController;
pub use filter::{matches_category, matches_search, matches_subcategory};
pub use pipeline::{filter_and_sort, run, DEFAULT_PAGE_SIZE};
pub use query::{FilterCriteria, SortOrder};
pub use results::{Page, Pagination};
