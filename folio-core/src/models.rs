//! Content model structs for articles and their previews.

use crate::excerpt;
use crate::frontmatter::Metadata;
use chrono::NaiveDate;
use folio_types::ArticleId;
use serde::{Deserialize, Serialize};

/// Fallback values for metadata a document does not supply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDefaults {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_author")]
    pub author: String,
}

fn default_title() -> String {
    String::from("Untitled")
}

fn default_category() -> String {
    String::from("Research")
}

fn default_author() -> String {
    String::from("Financial Brunch Team")
}

impl Default for ArticleDefaults {
    fn default() -> Self {
        Self {
            title: default_title(),
            category: default_category(),
            author: default_author(),
        }
    }
}

/// A single normalized article in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Document identifier without its extension
    pub id: ArticleId,

    /// Document identifier as listed in the manifest
    pub filename: String,

    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    pub category: String,

    pub author: String,

    /// Short plain-text summary, at most 200 characters plus an ellipsis
    pub excerpt: String,

    pub tags: Vec<String>,

    /// Estimated reading time in minutes (always at least 1)
    pub read_time: u32,

    /// Document body with the front matter removed
    pub content: String,

    pub featured: bool,

    pub published: bool,

    /// Front matter fields exactly as read
    pub metadata: Metadata,
}

impl Article {
    /// Publication date in US long form, e.g. "June 15, 2024"
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Structured preview of the first `max_lines` body lines
    pub fn preview(&self, max_lines: usize) -> Preview {
        excerpt::preview(&self.content, max_lines)
    }
}

/// One classified line of a body preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PreviewLine {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Break,
}

/// Leading lines of an article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub lines: Vec<PreviewLine>,

    /// The body has more lines than the preview shows
    pub truncated: bool,
}
