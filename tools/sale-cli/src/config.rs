//! CLI configuration.

use anyhow::{Context, Result};
use sale_catalog::import::ImportOptions;
use sale_catalog::search::{SortOrder, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["sale.toml", ".sale.toml", "sale.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Catalog data and browsing defaults.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// CSV import settings.
    #[serde(default)]
    pub import: ImportConfig,

    /// Price formatting.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text; `.json` paths are JSON, anything else TOML.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Import options derived from the `[import]` section.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            image_base_url: self.import.image_base_url.clone(),
            classify_categories: self.import.classify_categories,
        }
    }

    /// Check the config, returning `(errors, warnings)`.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.catalog.data_file.trim().is_empty() {
            errors.push("catalog.data_file is required".to_string());
        }
        if self.catalog.page_size == 0 {
            errors.push("catalog.page_size must be at least 1".to_string());
        } else if self.catalog.page_size > 200 {
            warnings.push(format!(
                "catalog.page_size {} is unusually large",
                self.catalog.page_size
            ));
        }
        if let Err(e) = self.catalog.default_sort.parse::<SortOrder>() {
            errors.push(format!("catalog.default_sort: {}", e));
        }
        if !self.import.image_base_url.starts_with("http://")
            && !self.import.image_base_url.starts_with("https://")
        {
            warnings.push(format!(
                "import.image_base_url '{}' is not an http(s) URL",
                self.import.image_base_url
            ));
        }
        if self.display.decimal_separator == self.display.thousands_separator {
            errors.push("display.decimal_separator and display.thousands_separator must differ".to_string());
        }

        (errors, warnings)
    }
}

/// Catalog data and browsing defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// JSON snapshot holding products, cart and favorites.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Products per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort order used when `--sort` is not given.
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

fn default_data_file() -> String {
    "sale-data.json".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_sort() -> String {
    SortOrder::default().as_str().to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            page_size: default_page_size(),
            default_sort: default_sort(),
        }
    }
}

/// CSV import settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportConfig {
    /// Base URL for `{base}/{sku}.png` fallback images.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Infer categories from product names while importing.
    #[serde(default)]
    pub classify_categories: bool,
}

fn default_image_base_url() -> String {
    ImportOptions::default().image_base_url
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            image_base_url: default_image_base_url(),
            classify_categories: false,
        }
    }
}

/// Price formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_thousands_separator() -> char {
    '.'
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimal_separator: default_decimal_separator(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

/// Generate a default sale.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Sale catalog configuration

[catalog]
data_file = "{data_file}"
page_size = {page_size}
default_sort = "{sort}"

[import]
image_base_url = "{image_base_url}"
classify_categories = false

[display]
currency_symbol = "R$"
decimal_separator = ","
thousands_separator = "."
"#,
        data_file = default_data_file(),
        page_size = default_page_size(),
        sort = default_sort(),
        image_base_url = default_image_base_url(),
    )
}
