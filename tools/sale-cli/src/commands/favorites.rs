//! Favorites commands.

use anyhow::{bail, Result};
use sale_catalog::pricing::final_price;
use sale_catalog::ProductId;

use super::{FavoritesArgs, FavoritesCommand};
use crate::context::Context;
use crate::output::format_price;

/// Run the favorites command.
pub async fn run(args: FavoritesArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(FavoritesCommand::List) | None => list_favorites(ctx).await,
        Some(FavoritesCommand::Toggle { id }) => toggle_favorite(&id, ctx).await,
    }
}

async fn toggle_favorite(id: &str, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(id);

    // Unfavoriting a product that was deleted is still allowed.
    if snapshot.store.get(&id).is_none() && !snapshot.favorites.contains(&id) {
        bail!("Product not found: {}", id);
    }

    let now_favorite = snapshot.favorites.toggle(id.clone());
    ctx.save_snapshot(&snapshot)?;

    if now_favorite {
        ctx.output.success(&format!("Added {} to favorites", id));
    } else {
        ctx.output
            .success(&format!("Removed {} from favorites", id));
    }

    Ok(())
}

async fn list_favorites(ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let favorites = snapshot.favorites.resolve(snapshot.store.products());

    if ctx.output.is_json() {
        ctx.output.json(&favorites);
        return Ok(());
    }

    ctx.output.header("Favoritos");

    if favorites.is_empty() {
        ctx.output.info("Nenhum favorito.");
        return Ok(());
    }

    let stale = snapshot.favorites.len() - favorites.len();
    for product in favorites {
        ctx.output.list_item(&format!(
            "{}  {}  {}",
            product.id,
            product.name,
            format_price(final_price(Some(product)), &ctx.config.display)
        ));
    }

    if stale > 0 {
        ctx.output.warn(&format!(
            "{} favorite(s) refer to products no longer in the catalog",
            stale
        ));
    }

    Ok(())
}
