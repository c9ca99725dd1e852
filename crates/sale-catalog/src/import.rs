//! Product import from CSV text.
//!
//! Expected columns, after a header row:
//! `sku,name,category,subcategory,vendor,price[,description[,imageUrl]]`.
//! Fields may be wrapped in double quotes (with `""` as an escaped quote);
//! nothing fancier is supported.

use crate::catalog::classify::clean_category;
use crate::catalog::Product;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Settings for turning CSV rows into products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Base URL used to derive `{base}/{sku}.png` when a row has no image.
    pub image_base_url: String,
    /// Infer category and subcategory from the product name and normalise
    /// known raw categories. Blank category columns are then accepted.
    pub classify_categories: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            image_base_url: "https://images.example.com/products".to_string(),
            classify_categories: false,
        }
    }
}

/// Products parsed from a CSV document plus the rows that were rejected.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Valid products, in file order.
    pub products: Vec<Product>,
    /// One error per rejected row.
    pub skipped: Vec<CatalogError>,
}

/// Parse CSV text into products. Bad rows are reported, not fatal.
pub fn parse_products_csv(text: &str, options: &ImportOptions) -> ImportReport {
    let mut report = ImportReport::default();

    // Line numbers are 1-based and count the header.
    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line, options) {
            Ok(product) => report.products.push(product),
            Err(reason) => {
                warn!(line = line_no, %reason, "skipping CSV row");
                report.skipped.push(CatalogError::Import {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    debug!(
        parsed = report.products.len(),
        skipped = report.skipped.len(),
        "CSV parsed"
    );
    report
}

fn parse_row(line: &str, options: &ImportOptions) -> Result<Product, String> {
    let fields = split_record(line);
    let field = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");

    let (sku, name, category, subcategory, vendor, price) =
        (field(0), field(1), field(2), field(3), field(4), field(5));

    if [sku, name, vendor, price].iter().any(|f| f.is_empty())
        || (!options.classify_categories && (category.is_empty() || subcategory.is_empty()))
    {
        return Err("missing one of sku, name, category, subcategory, vendor, price".to_string());
    }

    let (category, subcategory) = if options.classify_categories {
        clean_category(name, category, subcategory)
    } else {
        (category.to_string(), subcategory.to_string())
    };

    let price: f64 = price
        .parse()
        .map_err(|_| format!("invalid price '{}'", price))?;
    if !price.is_finite() || price < 0.0 {
        return Err(format!("invalid price '{}'", price));
    }

    let description = field(6);
    let image_url = match field(7) {
        "" => format!(
            "{}/{}.png",
            options.image_base_url.trim_end_matches('/'),
            sku
        ),
        url => url.to_string(),
    };

    let mut product = Product::new(sku, name)
        .with_category(category, subcategory)
        .with_vendor(vendor)
        .with_price(price);
    product.description = Some(description.to_string());
    product.image_url = Some(image_url);
    Ok(product)
}

/// Split one CSV record on commas, honouring double-quoted fields.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}
