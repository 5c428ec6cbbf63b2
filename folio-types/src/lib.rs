//! Shared types for folio
//!
//! This crate provides the vocabulary shared by the catalog core and its
//! front ends: article identifiers and the selectable query options
//! (sort keys, date ranges, field filters).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Article identifier, derived from a document identifier without its extension
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a document identifier such as `tax-basics.md`.
    ///
    /// Only the final extension is dropped, so `2024.06.outlook.md` becomes
    /// `2024.06.outlook`. Identifiers without an extension are kept whole.
    ///
    /// Any extension is dropped, not just `.md`: `q1.md` and `q1.txt` both
    /// become `q1`, and a catalog listing both fails to load with a
    /// duplicate id.
    pub fn from_document(document_id: &str) -> Self {
        let trimmed = document_id.trim();
        let stem = match trimmed.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
            _ => trimmed,
        };
        Self(stem.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        ArticleId(id.to_string())
    }
}

/// Ordering applied to the filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    Category,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::Category,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" => Some(SortKey::DateDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "title-asc" => Some(SortKey::TitleAsc),
            "title-desc" => Some(SortKey::TitleDesc),
            "category" => Some(SortKey::Category),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::Category => "category",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication-date window relative to the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateRange {
    pub const ALL: [DateRange; 5] = [
        DateRange::All,
        DateRange::Week,
        DateRange::Month,
        DateRange::Quarter,
        DateRange::Year,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(DateRange::All),
            "week" => Some(DateRange::Week),
            "month" => Some(DateRange::Month),
            "quarter" => Some(DateRange::Quarter),
            "year" => Some(DateRange::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::Quarter => "quarter",
            DateRange::Year => "year",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection over a free-form text field (category, author).
///
/// The sentinel `"all"` (any case) and the empty string select everything;
/// any other value selects records whose field equals it case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldFilter {
    #[default]
    All,
    Only(String),
}

impl FieldFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn from_str(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            FieldFilter::All
        } else {
            FieldFilter::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FieldFilter::All)
    }

    /// Check whether a field value passes this filter
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Only(wanted) => wanted.to_lowercase() == value.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldFilter::All => Self::ALL_SENTINEL,
            FieldFilter::Only(value) => value,
        }
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FieldFilter {
    fn from(value: String) -> Self {
        FieldFilter::from_str(&value)
    }
}

impl From<FieldFilter> for String {
    fn from(filter: FieldFilter) -> Self {
        filter.as_str().to_string()
    }
}
