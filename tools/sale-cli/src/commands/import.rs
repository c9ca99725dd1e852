//! CSV import command.

use std::fs;

use anyhow::{Context as _, Result};
use sale_catalog::import::parse_products_csv;
use serde::Serialize;

use super::ImportArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ImportOutput {
    parsed: usize,
    skipped: Vec<String>,
    added: usize,
    updated: usize,
    dry_run: bool,
}

/// Run the import command.
pub async fn run(args: ImportArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

    let mut options = ctx.config.import_options();
    if let Some(base) = args.image_base_url {
        options.image_base_url = base;
    }
    if args.classify {
        options.classify_categories = true;
    }

    ctx.output.header(&format!("Importing {}", path.display()));

    let report = parse_products_csv(&text, &options);
    for skipped in &report.skipped {
        ctx.output.warn(&format!("Skipped: {}", skipped));
    }
    ctx.output.info(&format!(
        "Parsed {} product(s), skipped {} row(s)",
        report.products.len(),
        report.skipped.len()
    ));

    let parsed = report.products.len();
    let skipped: Vec<String> = report.skipped.iter().map(ToString::to_string).collect();

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&ImportOutput {
                parsed,
                skipped,
                added: 0,
                updated: 0,
                dry_run: true,
            });
        } else {
            ctx.output.info("Dry run: nothing saved");
        }
        return Ok(());
    }

    let mut snapshot = ctx.load_snapshot()?;
    let summary = snapshot.store.upsert_imported(report.products)?;
    ctx.save_snapshot(&snapshot)?;

    if ctx.output.is_json() {
        ctx.output.json(&ImportOutput {
            parsed,
            skipped,
            added: summary.added,
            updated: summary.updated,
            dry_run: false,
        });
        return Ok(());
    }

    ctx.output.success(&format!(
        "Imported: {} added, {} updated",
        summary.added, summary.updated
    ));

    let missing = snapshot.store.products_missing_description().count();
    if missing > 0 {
        ctx.output.info(&format!(
            "{} product(s) have no description. Run `sale describe` to fill them in.",
            missing
        ));
    }

    Ok(())
}
