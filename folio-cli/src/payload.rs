//! JSON shapes emitted by `--json` commands.

use folio_core::{Article, CatalogStats, Metadata, Preview, QueryState};
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "2024-06-catalog-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

#[derive(Serialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub display_date: String,
    pub category: String,
    pub author: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub read_time: u32,
    pub featured: bool,
}

#[derive(Serialize)]
pub struct ListData {
    pub query: QueryState,
    pub stats: CatalogStats,
    pub articles: Vec<ArticleSummary>,
}

#[derive(Serialize)]
pub struct ArticleData {
    #[serde(flatten)]
    pub summary: ArticleSummary,
    pub filename: String,
    pub published: bool,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

#[derive(Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Serialize)]
pub struct CategoriesData {
    pub total: usize,
    pub categories: Vec<CategoryCount>,
}

pub fn article_summary(article: &Article) -> ArticleSummary {
    ArticleSummary {
        id: article.id.to_string(),
        title: article.title.clone(),
        date: article.date.to_string(),
        display_date: article.display_date(),
        category: article.category.clone(),
        author: article.author.clone(),
        excerpt: article.excerpt.clone(),
        tags: article.tags.clone(),
        read_time: article.read_time,
        featured: article.featured,
    }
}

/// Full article payload; with `preview_lines` only the body preview is included
pub fn article_to_payload(article: &Article, preview_lines: Option<usize>) -> ArticleData {
    let (content, preview) = match preview_lines {
        Some(lines) => (None, Some(article.preview(lines))),
        None => (Some(article.content.clone()), None),
    };

    ArticleData {
        summary: article_summary(article),
        filename: article.filename.clone(),
        published: article.published,
        metadata: article.metadata.clone(),
        content,
        preview,
    }
}
