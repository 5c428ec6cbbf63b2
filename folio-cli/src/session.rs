//! Opening a loaded catalog from command-line options.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use folio_core::{Catalog, Config, FixedClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Global options shared by every command
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub config_path: PathBuf,
    pub root: Option<PathBuf>,
    pub today: Option<NaiveDate>,
}

impl SessionOptions {
    /// Read the config file, falling back to defaults when it does not exist
    pub fn load_config(&self) -> Result<Config> {
        let config = if self.config_path.exists() {
            Config::from_file(&self.config_path).with_context(|| {
                format!(
                    "Failed to load configuration from {}",
                    self.config_path.display()
                )
            })?
        } else {
            tracing::debug!(
                "{} not found, using default configuration",
                self.config_path.display()
            );
            Config::default()
        };

        match &self.root {
            // Command-line paths are relative to the working directory
            Some(root) => Ok(config.with_source_root(std::env::current_dir()?.join(root))),
            None => Ok(config),
        }
    }
}

/// Build a catalog from the configured source and load every document
pub async fn open_catalog(opts: &SessionOptions) -> Result<Catalog> {
    let config = opts.load_config()?;

    let mut catalog = Catalog::from_config(&config);
    if let Some(today) = opts.today {
        catalog = catalog.with_clock(Arc::new(FixedClock(today)));
    }

    let source = config.directory_source();
    let manifest = source.manifest_path();
    catalog
        .load_from(Arc::new(source))
        .await
        .with_context(|| format!("Failed to load articles from {}", manifest.display()))?;

    Ok(catalog)
}
