//! Configuration parsing and management.

use crate::loader::DirectorySource;
use crate::models::ArticleDefaults;
use crate::pagination::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Main configuration struct matching the folio.yml schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Values used when a document's front matter omits a field
    #[serde(default)]
    pub defaults: ArticleDefaults,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding the manifest and documents
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Manifest file name, relative to `root`
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("content/research")
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DirectorySource::DEFAULT_MANIFEST)
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            manifest: default_manifest(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Articles revealed per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog.page_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Override the document root (e.g. from the command line)
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source.root = root.into();
        self
    }

    /// Get the document root, resolved relative to the config file
    pub fn source_root(&self) -> PathBuf {
        self.resolve_path(&self.source.root)
    }

    /// Directory-backed document source described by this config
    pub fn directory_source(&self) -> DirectorySource {
        DirectorySource::new(self.source_root()).with_manifest(&self.source.manifest)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.source.root, PathBuf::from("content/research"));
        assert_eq!(config.source.manifest, PathBuf::from("manifest.json"));
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.defaults.title, "Untitled");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
catalog:
  page_size: 9
defaults:
  author: "Research Desk"
"#,
        )
        .unwrap();
        assert_eq!(config.catalog.page_size, 9);
        assert_eq!(config.defaults.author, "Research Desk");
        assert_eq!(config.defaults.category, "Research");
        assert_eq!(config.source.root, PathBuf::from("content/research"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = Config::from_yaml("catalog:\n  page_size: 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("catalog: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_paths_resolve_against_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folio.yml");
        fs::write(&path, "source:\n  root: articles\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.source_root(), dir.path().join("articles"));
        assert_eq!(
            config.directory_source().manifest_path(),
            dir.path().join("articles").join("manifest.json")
        );
    }
}
