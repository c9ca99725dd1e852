//! Product administration commands.

use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use sale_catalog::catalog::Product;
use sale_catalog::ProductId;

use super::{ProductArgs, ProductCommand, ProductFields};
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Add { id, name, fields } => add_product(&id, &name, fields, ctx).await,
        ProductCommand::Edit { id, name, fields } => {
            edit_product(&id, name, fields, ctx).await
        }
        ProductCommand::Delete { id, yes } => delete_product(&id, yes, ctx).await,
    }
}

async fn add_product(id: &str, name: &str, fields: ProductFields, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;

    let mut product = Product::new(id, name);
    apply_fields(&mut product, fields);
    snapshot.store.add(product)?;

    ctx.save_snapshot(&snapshot)?;
    ctx.output.success(&format!("Added product {}", id));

    Ok(())
}

async fn edit_product(
    id: &str,
    name: Option<String>,
    fields: ProductFields,
    ctx: &Context,
) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    let mut product = snapshot
        .store
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;

    if let Some(name) = name {
        product.name = name;
    }
    apply_fields(&mut product, fields);
    snapshot.store.update(product)?;

    ctx.save_snapshot(&snapshot)?;
    ctx.output.success(&format!("Updated product {}", id));

    Ok(())
}

async fn delete_product(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    let name = snapshot
        .store
        .get(&id)
        .map(|p| p.name.clone())
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete product '{}' ({})?", name, id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    snapshot.store.delete(&id)?;

    // Cart lines and favorites pointing at the product go with it.
    snapshot.cart.remove(&id);
    snapshot.favorites.prune(snapshot.store.products());

    ctx.save_snapshot(&snapshot)?;
    ctx.output.success(&format!("Deleted product {}", id));

    Ok(())
}

/// Copy every field that was given on the command line onto `product`.
fn apply_fields(product: &mut Product, fields: ProductFields) {
    if let Some(category) = fields.category {
        product.category = category;
    }
    if let Some(subcategory) = fields.subcategory {
        product.subcategory = subcategory;
    }
    if let Some(vendor) = fields.vendor {
        product.vendor = vendor;
    }
    if fields.price.is_some() {
        product.price = fields.price;
    }
    if fields.margin.is_some() {
        product.margin = fields.margin;
    }
    if fields.description.is_some() {
        product.description = fields.description;
    }
    if fields.image_url.is_some() {
        product.image_url = fields.image_url;
    }
    if fields.purchase_link.is_some() {
        product.purchase_link = fields.purchase_link;
    }
}
