//! Browsing commands: list, categories, show.

use anyhow::{anyhow, Result};
use sale_catalog::catalog::{CategoryIndex, Product, ALL};
use sale_catalog::pricing::{final_price, profit};
use sale_catalog::search::{Pagination, SortOrder};
use sale_catalog::ProductId;
use serde::Serialize;

use super::{CategoriesArgs, ListArgs, ShowArgs};
use crate::context::Context;
use crate::output::{format_percent, format_price, margin_badge};

/// Page links shown under the product table.
const MAX_PAGE_LINKS: usize = 7;

#[derive(Serialize)]
struct ListedProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    final_price: f64,
    favorite: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    pagination: Pagination,
    items: Vec<ListedProduct<'a>>,
}

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;

    let sort = match args.sort.as_deref() {
        Some(s) => s.parse::<SortOrder>()?,
        None => ctx.default_sort(),
    };

    let products: Vec<Product> = if args.favorites {
        snapshot
            .favorites
            .resolve(snapshot.store.products())
            .into_iter()
            .cloned()
            .collect()
    } else {
        snapshot.store.products().to_vec()
    };

    let mut controller = ctx.controller();
    controller.set_sort(sort);
    controller.set_search_term(args.search.as_str());
    controller.set_category(args.category.as_str());
    controller.set_subcategory(args.subcategory.as_str());

    let index = controller.index(&products);
    if args.category != ALL && !index.categories().contains(&args.category) {
        ctx.output
            .warn(&format!("Unknown category '{}'", args.category));
    } else if args.subcategory != ALL && !index.contains(&args.category, &args.subcategory) {
        ctx.output.warn(&format!(
            "Subcategory '{}' is not part of '{}'",
            args.subcategory, args.category
        ));
    }

    let total_pages = controller.page(&products).pagination.total_pages;
    if args.page > 1 && !controller.set_page(args.page, total_pages) && total_pages > 0 {
        ctx.output.warn(&format!(
            "Page {} is past the end; showing page {}",
            args.page, total_pages
        ));
        controller.set_page(total_pages, total_pages);
    }
    let page = controller.sync_page(&products);

    if ctx.output.is_json() {
        let items = page
            .items
            .iter()
            .map(|p| ListedProduct {
                product: p,
                final_price: final_price(Some(p)),
                favorite: snapshot.favorites.contains(&p.id),
            })
            .collect();
        ctx.output.json(&ListOutput {
            pagination: page.pagination,
            items,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Produtos ({})", sort.display_name()));

    if page.is_empty() {
        ctx.output.info("Nenhum produto encontrado.");
        return Ok(());
    }

    let display = &ctx.config.display;
    let widths = [12, 32, 20, 14, 14, 8];
    ctx.output.table_row(
        &["ID", "Nome", "Categoria", "Preço", "Preço final", "Margem"],
        &widths,
    );
    for product in &page.items {
        let name = if snapshot.favorites.contains(&product.id) {
            format!("★ {}", product.name)
        } else {
            product.name.clone()
        };
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &name,
                &product.category,
                &format_price(product.base_price(), display),
                &format_price(final_price(Some(product)), display),
                &format_percent(product.margin_percent(), display),
            ],
            &widths,
        );
    }

    let p = page.pagination;
    println!();
    ctx.output.info(&format!(
        "Mostrando {}–{} de {} produtos",
        p.start_item(),
        p.end_item(),
        p.total
    ));
    if p.total_pages > 1 {
        let links: Vec<String> = p
            .page_numbers(MAX_PAGE_LINKS)
            .into_iter()
            .map(|n| {
                if n == p.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.info(&format!(
            "Página {} de {}: {}",
            p.page,
            p.total_pages,
            links.join(" ")
        ));
    }

    Ok(())
}

/// Run the categories command.
pub async fn categories(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let index = CategoryIndex::build(snapshot.store.products());

    if let Some(category) = args.category {
        let options = index.subcategory_options(&category);
        if ctx.output.is_json() {
            ctx.output.json(&options);
            return Ok(());
        }
        ctx.output.header(&format!("Subcategorias de {}", category));
        if category != ALL && !index.categories().contains(&category) {
            ctx.output.warn(&format!("Unknown category '{}'", category));
        }
        for sub in &options {
            ctx.output.list_item(sub);
        }
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&index);
        return Ok(());
    }

    ctx.output.header("Categorias");
    if index.is_empty() {
        ctx.output.info("Nenhuma categoria cadastrada.");
        return Ok(());
    }
    for category in index.categories().iter().filter(|c| c.as_str() != ALL) {
        let subs = index.subcategories(category);
        if subs.is_empty() {
            ctx.output.list_item(category);
        } else {
            ctx.output
                .list_item(&format!("{} ({})", category, subs.join(", ")));
        }
    }

    Ok(())
}

/// Run the show command.
pub async fn show(args: ShowArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;
    let id = ProductId::new(args.id);
    let product = snapshot
        .store
        .get(&id)
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;

    if ctx.output.is_json() {
        ctx.output.json(&ListedProduct {
            product,
            final_price: final_price(Some(product)),
            favorite: snapshot.favorites.contains(&id),
        });
        return Ok(());
    }

    let display = &ctx.config.display;
    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Categoria", &product.category);
    ctx.output.kv("Subcategoria", &product.subcategory);
    ctx.output.kv("Fornecedor", &product.vendor);
    ctx.output
        .kv("Preço base", &format_price(product.base_price(), display));
    ctx.output
        .kv("Margem", &margin_badge(product.margin_percent(), display));
    ctx.output
        .kv("Preço final", &format_price(final_price(Some(product)), display));
    ctx.output.kv("Lucro", &format_price(profit(Some(product)), display));
    if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        ctx.output.kv("Descrição", description);
    }
    if let Some(url) = &product.image_url {
        ctx.output.kv("Imagem", url);
    }
    if let Some(link) = &product.purchase_link {
        ctx.output.kv("Link", link);
    }
    if snapshot.favorites.contains(&id) {
        ctx.output.kv("Favorito", "sim");
    }

    Ok(())
}
