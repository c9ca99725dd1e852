//! Description and image backfill command.

use anyhow::Result;
use indicatif::ProgressBar;
use sale_catalog::catalog::{image_prompt, DescriptionSource, ImageSource, Product};
use sale_catalog::pricing::final_price;
use sale_catalog::CatalogError;
use serde::Serialize;

use super::DescribeArgs;
use crate::config::DisplayConfig;
use crate::context::Context;
use crate::output::format_price;

/// Builds a description from the product's own fields.
struct TemplateDescriptions<'a> {
    display: &'a DisplayConfig,
}

impl DescriptionSource for TemplateDescriptions<'_> {
    fn describe(&self, product: &Product) -> Result<String, CatalogError> {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Description {
                id: product.id.to_string(),
                reason: "product has no name".to_string(),
            });
        }

        let mut text = product.name.trim().to_string();
        match (product.category.is_empty(), product.subcategory.is_empty()) {
            (false, false) => text.push_str(&format!(
                " na categoria {} › {}",
                product.category, product.subcategory
            )),
            (false, true) => text.push_str(&format!(" na categoria {}", product.category)),
            _ => {}
        }
        if !product.vendor.is_empty() {
            text.push_str(&format!(", oferecido por {}", product.vendor));
        }
        text.push_str(&format!(
            ". Aproveite a oferta por {}.",
            format_price(final_price(Some(product)), self.display)
        ));

        Ok(text)
    }
}

/// Seeded stock photos standing in for generated product images.
struct PlaceholderImages;

/// Stock photo service used by [`PlaceholderImages`].
const PLACEHOLDER_IMAGE_URL: &str = "https://picsum.photos/seed";

impl ImageSource for PlaceholderImages {
    fn generate_image(&self, product: &Product) -> Result<String, CatalogError> {
        let seed: String = product
            .id
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if seed.is_empty() {
            return Err(CatalogError::Image {
                id: product.id.to_string(),
                reason: "no usable characters in product id".to_string(),
            });
        }
        tracing::debug!(id = %product.id, prompt = %image_prompt(product), "image requested");
        Ok(format!("{}/{}/400/300", PLACEHOLDER_IMAGE_URL, seed))
    }
}

/// Advances a progress bar as each product is processed.
struct WithProgress<'a, S> {
    inner: S,
    progress: &'a ProgressBar,
}

impl<S: DescriptionSource> DescriptionSource for WithProgress<'_, S> {
    fn describe(&self, product: &Product) -> Result<String, CatalogError> {
        self.progress.set_message(product.id.to_string());
        let result = self.inner.describe(product);
        self.progress.inc(1);
        result
    }
}

impl<S: ImageSource> ImageSource for WithProgress<'_, S> {
    fn generate_image(&self, product: &Product) -> Result<String, CatalogError> {
        self.progress.set_message(product.id.to_string());
        let result = self.inner.generate_image(product);
        self.progress.inc(1);
        result
    }
}

#[derive(Serialize)]
struct DescribeOutput {
    filled: usize,
    failed: usize,
}

/// Run the describe command.
pub async fn run(args: DescribeArgs, ctx: &Context) -> Result<()> {
    let mut snapshot = ctx.load_snapshot()?;

    let (pending, what): (Vec<String>, &str) = if args.images {
        let ids = snapshot.store.products_missing_image();
        (ids.map(|p| p.id.to_string()).collect(), "image")
    } else {
        let ids = snapshot.store.products_missing_description();
        (ids.map(|p| p.id.to_string()).collect(), "description")
    };

    if pending.is_empty() {
        ctx.output
            .info(&format!("Every product already has a {}.", what));
        return Ok(());
    }

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&pending);
            return Ok(());
        }
        ctx.output.header(&format!("Products without {}", what));
        for id in &pending {
            ctx.output.list_item(id);
        }
        return Ok(());
    }

    let progress = ctx
        .output
        .progress(pending.len() as u64, &format!("Generating {}s", what));
    let (filled, failed) = if args.images {
        let source = WithProgress {
            inner: PlaceholderImages,
            progress: &progress,
        };
        snapshot.store.backfill_images(&source)
    } else {
        let source = WithProgress {
            inner: TemplateDescriptions {
                display: &ctx.config.display,
            },
            progress: &progress,
        };
        snapshot.store.backfill_descriptions(&source)
    };
    progress.finish_and_clear();

    ctx.save_snapshot(&snapshot)?;

    if ctx.output.is_json() {
        ctx.output.json(&DescribeOutput { filled, failed });
        return Ok(());
    }

    ctx.output
        .success(&format!("Filled {} {}(s)", filled, what));
    if failed > 0 {
        ctx.output.warn(&format!(
            "{} product(s) could not get a {}",
            failed, what
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_description() {
        let display = DisplayConfig::default();
        let source = TemplateDescriptions { display: &display };
        let product = Product::new("A1", "Fone Bluetooth")
            .with_category("Eletrônicos", "Áudio")
            .with_vendor("SomMax")
            .with_price(100.0)
            .with_margin(20.0);

        assert_eq!(
            source.describe(&product).unwrap(),
            "Fone Bluetooth na categoria Eletrônicos › Áudio, oferecido por SomMax. \
             Aproveite a oferta por R$ 120,00."
        );
    }

    #[test]
    fn test_template_rejects_nameless_product() {
        let display = DisplayConfig::default();
        let source = TemplateDescriptions { display: &display };
        assert!(source.describe(&Product::new("A1", " ")).is_err());
    }

    #[test]
    fn test_progress_counts_every_product() {
        let display = DisplayConfig::default();
        let progress = ProgressBar::hidden();
        let source = WithProgress {
            inner: TemplateDescriptions { display: &display },
            progress: &progress,
        };
        source.describe(&Product::new("A1", "Mouse")).unwrap();
        source.describe(&Product::new("A2", "")).unwrap_err();
        assert_eq!(progress.position(), 2);
    }

    #[test]
    fn test_placeholder_image_uses_id_seed() {
        let url = PlaceholderImages
            .generate_image(&Product::new("BF 01/x", "Drone"))
            .unwrap();
        assert_eq!(url, "https://picsum.photos/seed/BF01x/400/300");
        assert!(PlaceholderImages
            .generate_image(&Product::new("çã", "Drone"))
            .is_err());
    }
}
