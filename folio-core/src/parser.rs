//! Turn raw documents into normalized [`Article`] records.
//!
//! Parsing never fails. Missing or malformed metadata falls back to the
//! configured [`ArticleDefaults`] so that every document yields an article.

use crate::excerpt::{generate_excerpt, read_time, truncate_excerpt};
use crate::frontmatter::{parse_frontmatter, Metadata};
use crate::models::{Article, ArticleDefaults};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_types::ArticleId;

/// Parses documents against a fixed set of defaults and a load date
#[derive(Debug, Clone)]
pub struct ArticleParser {
    defaults: ArticleDefaults,
    today: NaiveDate,
}

impl ArticleParser {
    /// `today` is the date given to documents that carry no usable date
    pub fn new(defaults: ArticleDefaults, today: NaiveDate) -> Self {
        Self { defaults, today }
    }

    pub fn parse(&self, raw: &str, document_id: &str) -> Article {
        parse_article(raw, document_id, &self.defaults, self.today)
    }
}

/// Parse one document into an article
pub fn parse_article(
    raw: &str,
    document_id: &str,
    defaults: &ArticleDefaults,
    today: NaiveDate,
) -> Article {
    let (metadata, body) = parse_frontmatter(raw);

    let excerpt = match metadata.value("excerpt") {
        Some(explicit) => truncate_excerpt(explicit),
        None => generate_excerpt(&body),
    };

    let date = match metadata.value("date") {
        Some(raw_date) => parse_date(raw_date).unwrap_or_else(|| {
            tracing::debug!(
                "{}: unrecognized date {:?}, using {}",
                document_id,
                raw_date,
                today
            );
            today
        }),
        None => today,
    };

    Article {
        id: ArticleId::from_document(document_id),
        filename: document_id.to_string(),
        title: text_or(&metadata, "title", &defaults.title),
        date,
        category: text_or(&metadata, "category", &defaults.category),
        author: text_or(&metadata, "author", &defaults.author),
        excerpt,
        tags: parse_tags(metadata.get("tags")),
        read_time: read_time(&body),
        featured: metadata.get("featured").is_some_and(is_true),
        published: !metadata.get("published").is_some_and(is_false),
        content: body,
        metadata,
    }
}

fn text_or(metadata: &Metadata, key: &str, fallback: &str) -> String {
    metadata.value(key).unwrap_or(fallback).to_string()
}

fn is_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn is_false(value: &str) -> bool {
    value.eq_ignore_ascii_case("false")
}

/// Split a comma-separated tag list, trimming entries and dropping empties
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse a metadata date.
///
/// Accepts calendar dates (`2024-06-10`, `2024/06/10`), RFC 3339 timestamps
/// and naive `YYYY-MM-DD[T ]HH:MM:SS` timestamps. Timestamps keep only their
/// calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }

    None
}
