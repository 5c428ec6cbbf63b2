//! Document sources feeding the catalog.
//!
//! A source publishes a manifest (the ordered list of document identifiers)
//! and serves each document's raw text. Loading is all-or-nothing: the first
//! failure aborts the whole fetch.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    MissingDocument(String),

    #[error("Failed to fetch {id}: {message}")]
    Fetch { id: String, message: String },

    #[error("Duplicate article id: {0}")]
    DuplicateId(String),

    #[error("Document {0:?} does not yield an article id")]
    EmptyId(String),

    #[error("No document source configured")]
    NoSource,
}

/// Ordered list of documents that make up the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub files: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_articles: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_id: Option<u64>,
}

impl Manifest {
    pub fn new(files: Vec<String>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Raw text of one document, keyed by its manifest identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub id: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Supplier of the manifest and document texts
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn manifest(&self) -> Result<Manifest, LoadError>;

    async fn fetch(&self, document_id: &str) -> Result<String, LoadError>;
}

/// Fetch the manifest and every document it lists, preserving manifest order
pub async fn fetch_documents(source: &dyn DocumentSource) -> Result<Vec<RawDocument>, LoadError> {
    let manifest = source.manifest().await?;
    tracing::debug!("Manifest lists {} documents", manifest.files.len());

    let fetches = manifest.files.iter().map(|id| async move {
        let text = source.fetch(id).await?;
        Ok::<_, LoadError>(RawDocument::new(id.clone(), text))
    });

    try_join_all(fetches).await
}

/// Documents stored as files in a directory alongside a JSON manifest
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    manifest: PathBuf,
}

impl DirectorySource {
    pub const DEFAULT_MANIFEST: &'static str = "manifest.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            manifest: PathBuf::from(Self::DEFAULT_MANIFEST),
        }
    }

    /// Use a manifest file other than `manifest.json` (relative to the root)
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    /// Resolve a document id under the root, refusing ids that escape it
    fn document_path(&self, document_id: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(document_id);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if document_id.is_empty() || escapes {
            return Err(LoadError::Fetch {
                id: document_id.to_string(),
                message: "path is outside the document root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

async fn read_text(path: PathBuf) -> Result<String, LoadError> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Io { path, source })
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn manifest(&self) -> Result<Manifest, LoadError> {
        let json = read_text(self.manifest_path()).await?;
        Manifest::from_json(&json)
    }

    async fn fetch(&self, document_id: &str) -> Result<String, LoadError> {
        read_text(self.document_path(document_id)?).await
    }
}

/// In-memory documents, listed in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    manifest: Manifest,
    documents: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and append it to the manifest
    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        self.manifest.files.push(id.clone());
        self.documents.insert(id, text.into());
        self
    }

    /// Replace the manifest; listed ids without a document fail to fetch
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifest = manifest;
        self
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    async fn manifest(&self) -> Result<Manifest, LoadError> {
        Ok(self.manifest.clone())
    }

    async fn fetch(&self, document_id: &str) -> Result<String, LoadError> {
        self.documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| LoadError::MissingDocument(document_id.to_string()))
    }
}
