//! Cart commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use sale_catalog::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx).await,
        Some(CartCommand::Add { id, quantity }) => add_to_cart(&id, quantity, ctx).await,
        Some(CartCommand::Set { id, quantity }) => set_quantity(&id, quantity, ctx).await,
        Some(CartCommand::Remove { id }) => remove_from_cart(&id, ctx).await,
        Some(CartCommand::Clear { yes }) => clear_cart(yes, ctx).await,
        Some(CartCommand::Export { output }) => export_cart(output.as_deref(), ctx).await,
    }
}

async fn add_to_cart(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    let Some(product) = snapshot.store.get(&id) else {
        bail!("Product not found: {}", id);
    };
    let name = product.name.clone();

    let total = snapshot.cart.add(id, quantity)?;
    ctx.save_snapshot(&snapshot)?;

    ctx.output
        .success(&format!("{} × {} in cart", total, name));

    Ok(())
}

async fn set_quantity(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    if !snapshot.cart.set_quantity(&id, quantity)? {
        bail!("Product {} is not in the cart", id);
    }
    ctx.save_snapshot(&snapshot)?;

    if quantity <= 0 {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output
            .success(&format!("Set {} to {} unit(s)", id, quantity));
    }

    Ok(())
}

async fn remove_from_cart(id: &str, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    if !snapshot.cart.remove(&id) {
        bail!("Product {} is not in the cart", id);
    }
    ctx.save_snapshot(&snapshot)?;

    ctx.output.success(&format!("Removed {} from cart", id));

    Ok(())
}

async fn clear_cart(yes: bool, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;

    if snapshot.cart.is_empty() {
        ctx.output.info("Cart is already empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                snapshot.cart.item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    snapshot.cart.clear();
    ctx.save_snapshot(&snapshot)?;
    ctx.output.success("Cart cleared");

    Ok(())
}

async fn show_cart(ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let pricing = snapshot.cart.calculate_pricing(snapshot.store.products());

    if ctx.output.is_json() {
        ctx.output.json(&pricing);
        return Ok(());
    }

    ctx.output.header("Carrinho");

    if pricing.lines.is_empty() && !pricing.has_missing() {
        ctx.output.info("O carrinho está vazio.");
        return Ok(());
    }

    let display = &ctx.config.display;
    let widths = [12, 32, 14, 6, 14];
    ctx.output
        .table_row(&["ID", "Nome", "Preço", "Qtd", "Total"], &widths);
    for line in &pricing.lines {
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &format_price(line.unit_price, display),
                &line.quantity.to_string(),
                &format_price(line.total, display),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Itens", &pricing.item_count().to_string());
    ctx.output
        .kv("Total", &format_price(pricing.grand_total, display));

    for id in &pricing.missing {
        ctx.output
            .warn(&format!("Product {} is no longer in the catalog", id));
    }

    Ok(())
}

async fn export_cart(output: Option<&str>, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;

    if snapshot.cart.is_empty() {
        bail!("Cart is empty, nothing to export");
    }

    let csv = snapshot.cart.export_csv(snapshot.store.products());

    match output {
        Some(path) => {
            let path = ctx.resolve_path(path);
            fs::write(&path, format!("{}\n", csv))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.output
                .success(&format!("Exported cart to {}", path.display()));
        }
        None => println!("{}", csv),
    }

    Ok(())
}
