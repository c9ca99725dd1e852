//! Filter, sort and paginate a product snapshot.
//!
//! The pipeline is a pure function of its inputs: it keeps no state between
//! calls and only borrows the products it is given.

use crate::catalog::Product;
use crate::collate;
use crate::search::filter::{matches_category, matches_search, matches_subcategory};
use crate::search::{FilterCriteria, Page, Pagination, SortOrder};
use tracing::debug;

/// Products per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Apply the filter and sort steps, returning every matching product.
///
/// 1. keep names containing the search term (case-insensitive)
/// 2. keep the selected category, unless it is `ALL`
/// 3. keep the selected subcategory, when a category is also selected
/// 4. stable sort by the chosen order
pub fn filter_and_sort<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.search_term.to_lowercase();
    let category = criteria.category.as_str();
    let subcategory = if criteria.has_subcategory() {
        criteria.subcategory.as_str()
    } else {
        crate::catalog::ALL
    };

    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| matches_category(p, category))
        .filter(|p| matches_subcategory(p, subcategory))
        .collect();

    // `sort_by` is stable, so equal keys keep their input order.
    match criteria.sort {
        SortOrder::NameAsc => matched.sort_by(|a, b| collate::compare(&a.name, &b.name)),
        SortOrder::NameDesc => matched.sort_by(|a, b| collate::compare(&b.name, &a.name)),
        SortOrder::PriceAsc => matched.sort_by(|a, b| a.base_price().total_cmp(&b.base_price())),
        SortOrder::PriceDesc => matched.sort_by(|a, b| b.base_price().total_cmp(&a.base_price())),
    }

    matched
}

/// Run the full pipeline and cut out the requested page.
///
/// A page past the end is clamped to the last page. When nothing matches,
/// the result is an empty page with `total_pages == 0`.
pub fn run<'a>(
    products: &'a [Product],
    criteria: &FilterCriteria,
    page_size: usize,
    page: usize,
) -> Page<'a> {
    let matched = filter_and_sort(products, criteria);
    let pagination = Pagination::new(page, page_size, matched.len());

    let items: Vec<&Product> = matched
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page)
        .collect();

    debug!(
        input = products.len(),
        matched = pagination.total,
        requested_page = page,
        page = pagination.page,
        total_pages = pagination.total_pages,
        sort = criteria.sort.as_str(),
        "catalog page computed"
    );

    Page { items, pagination }
}
