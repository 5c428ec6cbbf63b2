//! Front matter extraction from article documents.
//!
//! Documents may open with a block of `key: value` lines fenced by `---`
//! marker lines. Extraction is total: anything that does not look like a
//! well-formed block leaves the metadata empty and the whole document as body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker line that opens and closes a front matter block
pub const DELIMITER: &str = "---";

/// Key/value metadata read from a front matter block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for a key, including empty values
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for a key, treating an empty value as absent
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Split a document into its front matter and trimmed body.
///
/// An opening delimiter without a matching close is not front matter: the
/// metadata comes back empty and the entire document is the body.
///
/// # Example
///
/// ```
/// use folio_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: \"Tax Basics\"\ndate: 2024-06-10\n---\n# Hello\n";
///
/// let (meta, body) = parse_frontmatter(content);
/// assert_eq!(meta.get("title"), Some("Tax Basics"));
/// assert_eq!(meta.get("date"), Some("2024-06-10"));
/// assert_eq!(body, "# Hello");
/// ```
pub fn parse_frontmatter(content: &str) -> (Metadata, String) {
    let lines: Vec<&str> = content.split('\n').collect();

    let opens = lines.first().is_some_and(|line| is_delimiter(line));
    if !opens {
        return (Metadata::new(), content.trim().to_string());
    }

    let mut metadata = Metadata::new();
    for (idx, line) in lines.iter().enumerate().skip(1) {
        if is_delimiter(line) {
            let body = lines[idx + 1..].join("\n");
            return (metadata, body.trim().to_string());
        }
        if let Some((key, value)) = parse_field(line) {
            metadata.insert(key, value);
        }
    }

    // Unterminated block
    (Metadata::new(), content.trim().to_string())
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Parse a `key: value` line. The first colon separates key from value, so
/// values may themselves contain colons (times, URLs).
fn parse_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
    Some((key, value))
}
