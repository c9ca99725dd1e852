//! Sale CLI - Browse and administer a promotional sale catalog.
//!
//! Commands:
//! - `sale list` - Browse a filtered, sorted page of products
//! - `sale categories` - Show categories and subcategories
//! - `sale show` - Show one product with its sale price
//! - `sale product` - Add, edit or delete products
//! - `sale import` - Import products from CSV
//! - `sale margin` - Apply margins and show profitability
//! - `sale describe` - Fill in missing product descriptions
//! - `sale cart` - Manage the shopping cart
//! - `sale favorites` - Manage favorite products
//! - `sale config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CartArgs, CategoriesArgs, ConfigArgs, DescribeArgs, FavoritesArgs, ImportArgs, ListArgs,
    MarginArgs, ProductArgs, ShowArgs,
};

/// Sale CLI - Browse and administer a promotional sale catalog
#[derive(Parser)]
#[command(name = "sale")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of products
    List(ListArgs),

    /// Show categories and subcategories
    Categories(CategoriesArgs),

    /// Show a single product
    Show(ShowArgs),

    /// Add, edit or delete products
    Product(ProductArgs),

    /// Import products from a CSV file
    Import(ImportArgs),

    /// Apply margins and show profitability
    Margin(MarginArgs),

    /// Generate descriptions for products that have none
    Describe(DescribeArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Manage favorite products
    Favorites(FavoritesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Categories(args) => commands::list::categories(args, &ctx).await,
        Commands::Show(args) => commands::list::show(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Import(args) => commands::import::run(args, &ctx).await,
        Commands::Margin(args) => commands::margin::run(args, &ctx).await,
        Commands::Describe(args) => commands::describe::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Favorites(args) => commands::favorites::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
