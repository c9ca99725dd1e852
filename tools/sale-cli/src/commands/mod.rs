//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod describe;
pub mod favorites;
pub mod import;
pub mod list;
pub mod margin;
pub mod product;

use clap::{Args, Subcommand};
use sale_catalog::catalog::ALL;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in product names.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category filter.
    #[arg(long, default_value = ALL)]
    pub category: String,

    /// Subcategory filter (only applies with a category).
    #[arg(long, default_value = ALL)]
    pub subcategory: String,

    /// Sort order: name-asc, name-desc, price-asc, price-desc.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page to show (clamped to the last page).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Only list favorite products.
    #[arg(long)]
    pub favorites: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only show subcategories of this category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product ID (SKU).
    pub id: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Optional product attributes shared by add and edit.
#[derive(Args, Default)]
pub struct ProductFields {
    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Vendor.
    #[arg(long)]
    pub vendor: Option<String>,

    /// Base price.
    #[arg(long)]
    pub price: Option<f64>,

    /// Margin percentage.
    #[arg(long)]
    pub margin: Option<f64>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image_url: Option<String>,

    /// Purchase link.
    #[arg(long)]
    pub purchase_link: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a new product.
    Add {
        /// Product ID (SKU).
        id: String,
        /// Product name.
        name: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Change fields of an existing product.
    Edit {
        /// Product ID (SKU).
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product ID (SKU).
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to import.
    pub file: String,

    /// Override the configured image base URL.
    #[arg(long)]
    pub image_base_url: Option<String>,

    /// Infer categories from product names (overrides the config).
    #[arg(long)]
    pub classify: bool,

    /// Parse and report without saving.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the margin command.
#[derive(Args)]
pub struct MarginArgs {
    #[command(subcommand)]
    pub command: MarginCommand,
}

#[derive(Subcommand)]
pub enum MarginCommand {
    /// Set the margin of every product in a category.
    Apply {
        /// Margin percentage.
        #[arg(short, long)]
        percent: f64,
        /// Category to update ("Todas" for every product).
        #[arg(long, default_value = ALL)]
        category: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show profit totals and average margin.
    Stats {
        /// Restrict to one category.
        #[arg(long, default_value = ALL)]
        category: String,
    },
}

/// Arguments for the describe command.
#[derive(Args)]
pub struct DescribeArgs {
    /// Generate images for products without one instead of descriptions.
    #[arg(long)]
    pub images: bool,

    /// List the products that would be processed and exit.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add units of a product.
    Add {
        /// Product ID (SKU).
        id: String,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Set the quantity of a line (0 or less removes it).
    Set {
        /// Product ID (SKU).
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line.
    Remove {
        /// Product ID (SKU).
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the priced cart.
    Show,
    /// Export the priced cart as CSV.
    Export {
        /// Output file path (stdout when omitted).
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: Option<FavoritesCommand>,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// Mark or unmark a product as favorite.
    Toggle {
        /// Product ID (SKU).
        id: String,
    },
    /// List favorite products.
    List,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
