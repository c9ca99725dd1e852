//! In-memory product collection owned by the admin back-office.

use crate::catalog::{Product, ALL};
use crate::error::CatalogError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Produces marketing descriptions for products that lack one.
///
/// Implementations may call out to a text-generation service; the store only
/// cares about the resulting text or an error.
pub trait DescriptionSource {
    /// Describe `product`.
    fn describe(&self, product: &Product) -> Result<String, CatalogError>;
}

/// Produces an image URL for products without a real picture.
///
/// Implementations usually send [`image_prompt`] to an image-generation
/// service and return the URL of the result.
pub trait ImageSource {
    /// Generate an image for `product`, returning its URL.
    fn generate_image(&self, product: &Product) -> Result<String, CatalogError>;
}

/// Prompt describing a studio product photo for `product`.
pub fn image_prompt(product: &Product) -> String {
    let or = |value: &str, fallback: &str| {
        if value.trim().is_empty() {
            fallback.to_string()
        } else {
            value.trim().to_string()
        }
    };
    format!(
        "Fotografia de produto profissional de um(a) \"{}\", da marca {}. \
         Este item é da categoria \"{}\" e subcategoria \"{}\". \
         A imagem deve ter um fundo de estúdio limpo e neutro, com iluminação profissional \
         que realce os detalhes e a textura do produto. \
         Estilo comercial e de alta qualidade, adequado para um catálogo de e-commerce.",
        product.name.trim(),
        or(&product.vendor, "genérica"),
        or(&product.category, "geral"),
        or(&product.subcategory, "outros"),
    )
}

/// Outcome of merging imported records into the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// New products appended.
    pub added: usize,
    /// Existing products replaced.
    pub updated: usize,
}

/// Ordered product collection with unique identifiers.
///
/// The browsing core only ever sees `products()` as an immutable slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting duplicates and invalid
    /// products.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        for product in products {
            store.add(product)?;
        }
        Ok(store)
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consume the store, returning its products.
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Add a new product.
    pub fn add(&mut self, product: Product) -> Result<(), CatalogError> {
        product.validate().map_err(CatalogError::Validation)?;
        if self.get(&product.id).is_some() {
            return Err(CatalogError::DuplicateProduct(product.id.into_inner()));
        }
        info!(id = %product.id, name = %product.name, "product added");
        self.products.push(product);
        Ok(())
    }

    /// Replace an existing product, matched by id.
    pub fn update(&mut self, product: Product) -> Result<(), CatalogError> {
        product.validate().map_err(CatalogError::Validation)?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| CatalogError::ProductNotFound(product.id.to_string()))?;
        info!(id = %product.id, "product updated");
        *slot = product;
        Ok(())
    }

    /// Remove a product. Returns the removed record.
    pub fn delete(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let pos = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;
        info!(id = %id, "product deleted");
        Ok(self.products.remove(pos))
    }

    /// Set the margin of every product in `category` (or every product when
    /// `category` is `ALL`). Existing margins are overwritten.
    ///
    /// Returns the number of products updated.
    pub fn apply_margin(&mut self, category: &str, margin: f64) -> Result<usize, CatalogError> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(CatalogError::Validation(format!(
                "margin must be a non-negative number, got {}",
                margin
            )));
        }

        let mut count = 0;
        for product in self
            .products
            .iter_mut()
            .filter(|p| category == ALL || p.category == category)
        {
            product.margin = Some(margin);
            count += 1;
        }

        info!(category, margin, count, "margin applied");
        Ok(count)
    }

    /// Products whose description is missing or blank.
    pub fn products_missing_description(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.has_description())
    }

    /// Store a generated description for a product.
    pub fn set_description(
        &mut self,
        id: &ProductId,
        description: impl Into<String>,
    ) -> Result<(), CatalogError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;
        product.description = Some(description.into());
        Ok(())
    }

    /// Fill in every missing description from `source`.
    ///
    /// A failure for one product is logged and skipped; the rest are still
    /// processed. Returns `(filled, failed)`.
    pub fn backfill_descriptions(&mut self, source: &dyn DescriptionSource) -> (usize, usize) {
        let (filled, failed) = self.backfill(
            |p| !p.has_description(),
            |p| source.describe(p),
            |p, text| p.description = Some(text),
        );
        info!(filled, failed, "description backfill finished");
        (filled, failed)
    }

    /// Products whose image is missing or a known placeholder.
    pub fn products_missing_image(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.has_image())
    }

    /// Generate images from `source` for products without a real one.
    ///
    /// Same failure handling as [`backfill_descriptions`](Self::backfill_descriptions).
    pub fn backfill_images(&mut self, source: &dyn ImageSource) -> (usize, usize) {
        let (filled, failed) = self.backfill(
            |p| !p.has_image(),
            |p| source.generate_image(p),
            |p, url| p.image_url = Some(url),
        );
        info!(filled, failed, "image backfill finished");
        (filled, failed)
    }

    fn backfill(
        &mut self,
        needs: impl Fn(&Product) -> bool,
        produce: impl Fn(&Product) -> Result<String, CatalogError>,
        assign: impl Fn(&mut Product, String),
    ) -> (usize, usize) {
        let mut filled = 0;
        let mut failed = 0;

        for product in self.products.iter_mut().filter(|p| needs(p)) {
            match produce(product) {
                Ok(value) if !value.trim().is_empty() => {
                    assign(product, value);
                    filled += 1;
                }
                Ok(_) => {
                    warn!(id = %product.id, "source returned empty text");
                    failed += 1;
                }
                Err(e) => {
                    warn!(id = %product.id, error = %e, "generation failed");
                    failed += 1;
                }
            }
        }

        (filled, failed)
    }

    /// Merge imported records.
    ///
    /// Unknown ids are appended. Known ids are replaced by the imported
    /// record, except that an existing image URL, description and margin
    /// survive when the stored value is present and non-empty.
    ///
    /// The whole batch is validated first; on error the store is unchanged.
    pub fn upsert_imported(&mut self, imported: Vec<Product>) -> Result<ImportSummary, CatalogError> {
        imported.iter().try_for_each(|p| {
            p.validate()
                .map_err(|e| CatalogError::Validation(format!("{}: {}", p.id, e)))
        })?;

        let mut summary = ImportSummary::default();

        for mut incoming in imported {
            match self.products.iter_mut().find(|p| p.id == incoming.id) {
                Some(existing) => {
                    if existing.image_url.as_deref().is_some_and(|u| !u.is_empty()) {
                        incoming.image_url = existing.image_url.take();
                    }
                    if existing.has_description() {
                        incoming.description = existing.description.take();
                    }
                    if existing.margin.is_some() {
                        incoming.margin = existing.margin;
                    }
                    *existing = incoming;
                    summary.updated += 1;
                }
                None => {
                    self.products.push(incoming);
                    summary.added += 1;
                }
            }
        }

        info!(added = summary.added, updated = summary.updated, "import merged");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> ProductStore {
        ProductStore::from_products(vec![
            Product::new("A-1", "Fone").with_category("Eletrônicos", "Áudio").with_price(100.0),
            Product::new("A-2", "Notebook").with_category("Eletrônicos", "Laptops").with_price(3000.0),
            Product::new("B-1", "Panela").with_category("Casa e Cozinha", "Utensílios").with_price(80.0),
        ])
        .unwrap()
    }

    struct FixedSource;

    impl DescriptionSource for FixedSource {
        fn describe(&self, product: &Product) -> Result<String, CatalogError> {
            if product.id.as_str() == "A-2" {
                return Err(CatalogError::Description {
                    id: product.id.to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            Ok(format!("Oferta: {}", product.name))
        }
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut store = sample_store();
        let result = store.add(Product::new("A-1", "Outro"));
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "A-1"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_rejects_invalid_product() {
        let mut store = ProductStore::new();
        let result = store.add(Product::new("X", "Ruim").with_price(-5.0));
        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = sample_store();
        let edited = Product::new("A-1", "Fone Pro").with_price(150.0);
        store.update(edited).unwrap();
        assert_eq!(store.get(&ProductId::new("A-1")).unwrap().name, "Fone Pro");

        let removed = store.delete(&ProductId::new("A-2")).unwrap();
        assert_eq!(removed.name, "Notebook");
        assert_eq!(store.len(), 2);

        assert!(matches!(
            store.delete(&ProductId::new("A-2")),
            Err(CatalogError::ProductNotFound(_))
        ));
        assert!(store.update(Product::new("Z-9", "Nada")).is_err());
    }

    #[test]
    fn test_apply_margin_to_category() {
        let mut store = sample_store();
        let count = store.apply_margin("Eletrônicos", 25.0).unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.get(&ProductId::new("A-1")).unwrap().margin, Some(25.0));
        assert_eq!(store.get(&ProductId::new("B-1")).unwrap().margin, None);
    }

    #[test]
    fn test_apply_margin_to_all_overwrites() {
        let mut store = sample_store();
        store.apply_margin("Eletrônicos", 25.0).unwrap();
        let count = store.apply_margin(ALL, 10.0).unwrap();
        assert_eq!(count, 3);
        assert!(store.products().iter().all(|p| p.margin == Some(10.0)));
    }

    #[test]
    fn test_apply_margin_rejects_negative() {
        let mut store = sample_store();
        assert!(store.apply_margin(ALL, -1.0).is_err());
        assert!(store.products().iter().all(|p| p.margin.is_none()));
    }

    #[test]
    fn test_backfill_descriptions_skips_failures() {
        let mut store = sample_store();
        store.set_description(&ProductId::new("B-1"), "Já descrito").unwrap();

        let (filled, failed) = store.backfill_descriptions(&FixedSource);
        assert_eq!((filled, failed), (1, 1));
        assert_eq!(
            store.get(&ProductId::new("A-1")).unwrap().description.as_deref(),
            Some("Oferta: Fone")
        );
        assert_eq!(
            store.get(&ProductId::new("B-1")).unwrap().description.as_deref(),
            Some("Já descrito")
        );
        assert_eq!(store.products_missing_description().count(), 1);
    }

    #[test]
    fn test_upsert_keeps_existing_enrichment() {
        let mut store = sample_store();
        store.apply_margin(ALL, 30.0).unwrap();
        store.set_description(&ProductId::new("A-1"), "Som limpo").unwrap();
        let mut enriched = store.get(&ProductId::new("A-1")).unwrap().clone();
        enriched.image_url = Some("https://cdn/a1.png".to_string());
        store.update(enriched).unwrap();

        let mut incoming = Product::new("A-1", "Fone 2").with_price(90.0);
        incoming.image_url = Some("https://default/a1.png".to_string());
        incoming.description = Some("Novo texto".to_string());
        let fresh = Product::new("C-1", "Bola").with_price(40.0);

        let summary = store.upsert_imported(vec![incoming, fresh]).unwrap();
        assert_eq!(summary, ImportSummary { added: 1, updated: 1 });

        let merged = store.get(&ProductId::new("A-1")).unwrap();
        assert_eq!(merged.name, "Fone 2");
        assert_eq!(merged.price, Some(90.0));
        assert_eq!(merged.image_url.as_deref(), Some("https://cdn/a1.png"));
        assert_eq!(merged.description.as_deref(), Some("Som limpo"));
        assert_eq!(merged.margin, Some(30.0));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_upsert_rejects_bad_batch_without_partial_merge() {
        let mut store = ProductStore::from_products(vec![Product::new("A", "Fone")]).unwrap();
        let before = store.clone();

        let batch = vec![
            Product::new("A", "Fone 2"),
            Product::new("B", "Mouse").with_price(20.0),
            Product::new("C", "Cabo").with_price(-1.0),
        ];
        let result = store.upsert_imported(batch);

        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.starts_with("C:")));
        assert_eq!(store, before);
    }

    struct FlakyImages;

    impl ImageSource for FlakyImages {
        fn generate_image(&self, product: &Product) -> Result<String, CatalogError> {
            if product.id.as_str() == "B-1" {
                return Err(CatalogError::Image {
                    id: product.id.to_string(),
                    reason: "content policy".to_string(),
                });
            }
            Ok(format!("https://img.test/{}.png", product.id))
        }
    }

    #[test]
    fn test_backfill_images_replaces_placeholders_only() {
        let mut store = sample_store();
        let mut real = store.get(&ProductId::new("A-2")).unwrap().clone();
        real.image_url = Some("https://cdn/notebook.jpg".to_string());
        store.update(real).unwrap();
        let mut placeholder = store.get(&ProductId::new("A-1")).unwrap().clone();
        placeholder.image_url =
            Some("https://via.placeholder.com/300x300.png?text=No+Image".to_string());
        store.update(placeholder).unwrap();

        assert_eq!(store.products_missing_image().count(), 2);

        let (filled, failed) = store.backfill_images(&FlakyImages);
        assert_eq!((filled, failed), (1, 1));
        assert_eq!(
            store.get(&ProductId::new("A-1")).unwrap().image_url.as_deref(),
            Some("https://img.test/A-1.png")
        );
        assert_eq!(
            store.get(&ProductId::new("A-2")).unwrap().image_url.as_deref(),
            Some("https://cdn/notebook.jpg")
        );
        assert_eq!(store.get(&ProductId::new("B-1")).unwrap().image_url, None);
    }

    #[test]
    fn test_image_prompt_falls_back_for_blank_fields() {
        let product = Product::new("X", "Chaleira").with_vendor("Arno");
        let prompt = image_prompt(&product);
        assert!(prompt.starts_with("Fotografia de produto profissional de um(a) \"Chaleira\", da marca Arno."));
        assert!(prompt.contains("categoria \"geral\" e subcategoria \"outros\""));
    }
}
