//! # folio-core
//!
//! Core library for the folio article catalog.
//!
//! This crate parses markdown documents with front matter into articles,
//! loads them from a manifest-driven source, and serves a filtered, sorted,
//! paginated view of them through [`Catalog`].

pub mod catalog;
pub mod clock;
pub mod collation;
pub mod config;
pub mod excerpt;
pub mod frontmatter;
pub mod loader;
pub mod models;
pub mod pagination;
pub mod parser;
pub mod query;

pub use catalog::{Catalog, CatalogStats, LoadStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, ConfigError};
pub use frontmatter::{parse_frontmatter, Metadata};
pub use loader::{
    fetch_documents, DirectorySource, DocumentSource, LoadError, Manifest, MemorySource,
    RawDocument,
};
pub use models::{Article, ArticleDefaults, Preview, PreviewLine};
pub use pagination::{PageCursor, DEFAULT_PAGE_SIZE};
pub use parser::{parse_article, ArticleParser};
pub use query::QueryState;

pub use folio_types::{ArticleId, DateRange, FieldFilter, SortKey};
