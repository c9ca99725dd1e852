//! Margin commands.

use anyhow::Result;
use dialoguer::Confirm;
use sale_catalog::catalog::{Product, ALL};
use sale_catalog::pricing::MarginSummary;

use super::{MarginArgs, MarginCommand};
use crate::context::Context;
use crate::output::{format_percent, format_price};

/// Run the margin command.
pub async fn run(args: MarginArgs, ctx: &Context) -> Result<()> {
    match args.command {
        MarginCommand::Apply {
            percent,
            category,
            yes,
        } => apply_margin(percent, &category, yes, ctx).await,
        MarginCommand::Stats { category } => margin_stats(&category, ctx).await,
    }
}

async fn apply_margin(percent: f64, category: &str, yes: bool, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;

    let affected = snapshot
        .store
        .products()
        .iter()
        .filter(|p| category == ALL || p.category == category)
        .count();

    if affected == 0 {
        ctx.output
            .warn(&format!("No products in category '{}'", category));
        return Ok(());
    }

    if !yes {
        let scope = if category == ALL {
            "all products".to_string()
        } else {
            format!("category '{}'", category)
        };
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Set margin to {} for {} ({} product(s))?",
                format_percent(percent, &ctx.config.display),
                scope,
                affected
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let count = snapshot.store.apply_margin(category, percent)?;
    ctx.save_snapshot(&snapshot)?;

    ctx.output
        .success(&format!("Margin updated on {} product(s)", count));

    Ok(())
}

async fn margin_stats(category: &str, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;

    let products: Vec<Product> = snapshot
        .store
        .products()
        .iter()
        .filter(|p| category == ALL || p.category == category)
        .cloned()
        .collect();
    let summary = MarginSummary::from_products(&products);

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    let display = &ctx.config.display;
    ctx.output.header(&format!("Lucratividade ({})", category));
    ctx.output
        .kv("Lucro total", &format_price(summary.total_profit, display));
    ctx.output
        .kv("Margem média", &format_percent(summary.average_margin, display));
    ctx.output.kv(
        "Com margem",
        &format!("{} de {} produtos", summary.with_margin, summary.total),
    );

    Ok(())
}
