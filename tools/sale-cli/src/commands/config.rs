//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_dir {
        Some(dir) => ctx.output.kv("config dir", &dir.display().to_string()),
        None => ctx.output.kv("config dir", "(none, using defaults)"),
    }
    ctx.output.kv("data path", &ctx.data_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("data_file", &ctx.config.catalog.data_file);
    ctx.output.kv("page_size", &ctx.config.catalog.page_size.to_string());
    ctx.output.kv("default_sort", &ctx.config.catalog.default_sort);

    ctx.output.info("");
    ctx.output.info("[import]");
    ctx.output.kv("image_base_url", &ctx.config.import.image_base_url);
    ctx.output.kv(
        "classify_categories",
        &ctx.config.import.classify_categories.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[display]");
    ctx.output.kv("currency_symbol", &ctx.config.display.currency_symbol);
    ctx.output.kv(
        "decimal_separator",
        &ctx.config.display.decimal_separator.to_string(),
    );
    ctx.output.kv(
        "thousands_separator",
        &ctx.config.display.thousands_separator.to_string(),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("sale.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
