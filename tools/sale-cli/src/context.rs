//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use sale_catalog::search::{CatalogController, SortOrder};
use sale_catalog::snapshot::Snapshot;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory holding the config file, when one was found.
    pub config_dir: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_dir) = if let Some(path) = config_path {
            let dir = Path::new(path).parent().map(|p| cwd.join(p));
            (CliConfig::load(path)?, dir)
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, dir)) => (config, Some(dir)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the catalog snapshot. Relative paths resolve against the
    /// config file's directory, or the working directory without one.
    pub fn data_path(&self) -> PathBuf {
        let base = self.config_dir.as_deref().unwrap_or(&self.cwd);
        let path = Path::new(&self.config.catalog.data_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Load the catalog snapshot.
    pub fn load_snapshot(&self) -> Result<Snapshot> {
        let path = self.data_path();
        self.output.debug(&format!("Loading catalog from {}", path.display()));
        Snapshot::load(&path)
            .with_context(|| format!("Failed to load catalog data: {}", path.display()))
    }

    /// Persist the catalog snapshot.
    pub fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let path = self.data_path();
        snapshot
            .save(&path)
            .with_context(|| format!("Failed to save catalog data: {}", path.display()))?;
        self.output.debug(&format!("Saved catalog to {}", path.display()));
        Ok(())
    }

    /// Sort order from the config, falling back to the default on a bad value.
    pub fn default_sort(&self) -> SortOrder {
        self.config
            .catalog
            .default_sort
            .parse()
            .unwrap_or_else(|e| {
                self.output.warn(&format!("{}; using name-asc", e));
                SortOrder::default()
            })
    }

    /// A controller sized by the configured page size.
    pub fn controller(&self) -> CatalogController {
        CatalogController::new(self.config.catalog.page_size)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &Path, config_dir: Option<PathBuf>) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            config_dir,
        }
    }

    #[test]
    fn test_data_path_prefers_config_dir() {
        let cwd = tempfile::tempdir().unwrap();
        let cfg = tempfile::tempdir().unwrap();

        let ctx = context(cwd.path(), Some(cfg.path().to_path_buf()));
        assert_eq!(ctx.data_path(), cfg.path().join("sale-data.json"));

        let ctx = context(cwd.path(), None);
        assert_eq!(ctx.data_path(), cwd.path().join("sale-data.json"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("sale.toml"), "[catalog]\npage_size = 5\n").unwrap();

        let (config, dir) = Context::find_config(&nested).unwrap();
        assert_eq!(config.catalog.page_size, 5);
        assert_eq!(dir, root.path());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), None);

        let mut snapshot = ctx.load_snapshot().unwrap();
        assert!(snapshot.store.is_empty());

        snapshot
            .store
            .add(sale_catalog::catalog::Product::new("X1", "Mouse").with_price(10.0))
            .unwrap();
        ctx.save_snapshot(&snapshot).unwrap();

        assert_eq!(ctx.load_snapshot().unwrap().store.len(), 1);
    }
}
