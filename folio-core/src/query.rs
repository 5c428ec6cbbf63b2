//! Query engine: search, filters and sorting over the article set.
//!
//! [`apply`] is a pure function of its inputs. The catalog calls it after
//! every query mutation, so repeated identical mutations are harmless.

use crate::collation::locale_cmp;
use crate::models::Article;
use chrono::{Days, Months, NaiveDate};
use folio_types::{DateRange, FieldFilter, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Search text, filter selections and sort order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryState {
    /// Case-insensitive substring matched against title, excerpt and tags
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub category: FieldFilter,

    #[serde(default)]
    pub author: FieldFilter,

    #[serde(default)]
    pub date_range: DateRange,

    #[serde(default)]
    pub sort: SortKey,
}

impl QueryState {
    /// True when no search or filter narrows the result set
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.category.is_all()
            && self.author.is_all()
            && self.date_range == DateRange::All
    }
}

/// Earliest publication date admitted by a date range, relative to `today`.
///
/// Returns `None` for [`DateRange::All`]. Month arithmetic clamps to the end
/// of shorter months (May 31 minus one month is April 30).
pub fn date_cutoff(range: DateRange, today: NaiveDate) -> Option<NaiveDate> {
    let cutoff = match range {
        DateRange::All => return None,
        DateRange::Week => today.checked_sub_days(Days::new(7)),
        DateRange::Month => today.checked_sub_months(Months::new(1)),
        DateRange::Quarter => today.checked_sub_months(Months::new(3)),
        DateRange::Year => today.checked_sub_months(Months::new(12)),
    };
    Some(cutoff.unwrap_or(NaiveDate::MIN))
}

/// Whether an article matches a lowercased search needle
pub fn matches_search(article: &Article, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    article.title.to_lowercase().contains(needle)
        || article.excerpt.to_lowercase().contains(needle)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Ordering of two articles under a sort key. Equal keys compare equal.
pub fn compare(sort: SortKey, a: &Article, b: &Article) -> Ordering {
    match sort {
        SortKey::DateDesc => b.date.cmp(&a.date),
        SortKey::DateAsc => a.date.cmp(&b.date),
        SortKey::TitleAsc => locale_cmp(&a.title, &b.title),
        SortKey::TitleDesc => locale_cmp(&b.title, &a.title),
        SortKey::Category => locale_cmp(&a.category, &b.category),
    }
}

/// Run the query pipeline: search, category, author, date range, then a
/// stable sort. Articles with equal sort keys keep their input order.
pub fn apply(articles: &[Arc<Article>], query: &QueryState, today: NaiveDate) -> Vec<Arc<Article>> {
    let needle = query.search.to_lowercase();
    let cutoff = date_cutoff(query.date_range, today);

    let mut results: Vec<Arc<Article>> = articles
        .iter()
        .filter(|article| matches_search(article, &needle))
        .filter(|article| query.category.matches(&article.category))
        .filter(|article| query.author.matches(&article.author))
        .filter(|article| cutoff.map_or(true, |cutoff| article.date >= cutoff))
        .cloned()
        .collect();

    results.sort_by(|a, b| compare(query.sort, a, b));
    results
}
