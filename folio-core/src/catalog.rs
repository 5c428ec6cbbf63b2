//! The article catalog: loaded articles plus the current query and page.
//!
//! A [`Catalog`] owns the article set and the query state. The article set
//! is replaced wholesale by a successful load and is otherwise read-only;
//! the query state changes only through the setters below. Every change
//! recomputes the filtered view and publishes fresh [`CatalogStats`] to
//! subscribers.

use crate::clock::{Clock, SystemClock};
use crate::collation::locale_cmp;
use crate::config::Config;
use crate::loader::{fetch_documents, DocumentSource, LoadError, RawDocument};
use crate::models::{Article, ArticleDefaults};
use crate::pagination::PageCursor;
use crate::parser::ArticleParser;
use crate::query::{self, QueryState};
use folio_types::{DateRange, FieldFilter, SortKey};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Outcome of the most recent load attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing has been loaded yet
    Empty,
    Ready { count: usize },
    /// The last load failed; the previous articles (if any) are still served
    Failed { message: String },
}

/// Counts for status displays ("6 of 8 articles", "Showing 6 of 8")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    /// Articles in the catalog
    pub total: usize,
    /// Articles matching the current query
    pub filtered: usize,
    /// Matching articles currently shown
    pub shown: usize,
    pub has_more: bool,
    pub total_pages: usize,
    /// A page advance is waiting for [`Catalog::settle_page`]
    pub pending: bool,
    /// Incremented on every load and query change
    pub revision: u64,
}

impl CatalogStats {
    /// True when the query hides some articles
    pub fn is_filtered(&self) -> bool {
        self.filtered != self.total
    }
}

pub struct Catalog {
    articles: Vec<Arc<Article>>,
    filtered: Vec<Arc<Article>>,
    query: QueryState,
    cursor: PageCursor,
    defaults: ArticleDefaults,
    clock: Arc<dyn Clock>,
    source: Option<Arc<dyn DocumentSource>>,
    status: LoadStatus,
    revision: u64,
    notifier: watch::Sender<CatalogStats>,
}

impl Catalog {
    pub fn new(page_size: usize, defaults: ArticleDefaults) -> Self {
        let (notifier, _) = watch::channel(CatalogStats::default());
        Self {
            articles: Vec::new(),
            filtered: Vec::new(),
            query: QueryState::default(),
            cursor: PageCursor::new(page_size),
            defaults,
            clock: Arc::new(SystemClock),
            source: None,
            status: LoadStatus::Empty,
            revision: 0,
            notifier,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog.page_size, config.defaults.clone())
    }

    /// Use a different source of "today" (for date defaults and date ranges)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace the article set with freshly parsed documents.
    ///
    /// Query state and pagination return to their defaults. Fails without
    /// touching the current articles if two documents map to the same id or
    /// a document yields an empty id.
    pub fn load(&mut self, documents: Vec<RawDocument>) -> Result<usize, LoadError> {
        let parser = ArticleParser::new(self.defaults.clone(), self.clock.today());
        let mut seen = HashSet::new();
        let mut articles = Vec::with_capacity(documents.len());

        for document in &documents {
            let article = parser.parse(&document.text, &document.id);
            if article.id.is_empty() {
                return Err(self.fail(LoadError::EmptyId(document.id.clone())));
            }
            if !seen.insert(article.id.clone()) {
                return Err(self.fail(LoadError::DuplicateId(article.id.to_string())));
            }
            articles.push(Arc::new(article));
        }

        let count = articles.len();
        self.articles = articles;
        self.query = QueryState::default();
        self.cursor = PageCursor::new(self.cursor.page_size());
        self.status = LoadStatus::Ready { count };
        self.recompute();

        tracing::info!("Loaded {} articles", count);
        Ok(count)
    }

    /// Fetch everything from `source` and load it. The source is kept for
    /// later [`Catalog::refresh`] calls.
    pub async fn load_from(&mut self, source: Arc<dyn DocumentSource>) -> Result<usize, LoadError> {
        self.source = Some(Arc::clone(&source));
        self.reload(source.as_ref()).await
    }

    /// Discard the article set and load it again from the current source
    pub async fn refresh(&mut self) -> Result<usize, LoadError> {
        let source = self.source.clone().ok_or(LoadError::NoSource)?;
        self.reload(source.as_ref()).await
    }

    async fn reload(&mut self, source: &dyn DocumentSource) -> Result<usize, LoadError> {
        match fetch_documents(source).await {
            Ok(documents) => self.load(documents),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, error: LoadError) -> LoadError {
        tracing::warn!("Catalog load failed: {}", error);
        self.status = LoadStatus::Failed {
            message: error.to_string(),
        };
        self.revision += 1;
        self.publish();
        error
    }

    // ------------------------------------------------------------------
    // Query mutations
    // ------------------------------------------------------------------

    pub fn set_search_text(&mut self, text: &str) {
        self.query.search = text.to_string();
        self.requery();
    }

    /// Select a category, or everything with `"all"`
    pub fn set_category_filter(&mut self, value: &str) {
        self.query.category = FieldFilter::from_str(value);
        self.requery();
    }

    /// Select an author, or everything with `"all"`
    pub fn set_author_filter(&mut self, value: &str) {
        self.query.author = FieldFilter::from_str(value);
        self.requery();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.query.date_range = range;
        self.requery();
    }

    /// Set the date range by name. Unknown names leave the query untouched
    /// and return `false`.
    pub fn set_date_range_filter(&mut self, value: &str) -> bool {
        match DateRange::from_str(value) {
            Some(range) => {
                self.set_date_range(range);
                true
            }
            None => {
                tracing::warn!("Ignoring unknown date range {:?}", value);
                false
            }
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.requery();
    }

    /// Set the sort key by name. Unknown names leave the query untouched
    /// and return `false`.
    pub fn set_sort_key(&mut self, value: &str) -> bool {
        match SortKey::from_str(value) {
            Some(sort) => {
                self.set_sort(sort);
                true
            }
            None => {
                tracing::warn!("Ignoring unknown sort key {:?}", value);
                false
            }
        }
    }

    /// Reset search, filters and sort to their defaults
    pub fn clear_filters(&mut self) {
        self.query = QueryState::default();
        self.requery();
    }

    /// Reveal one more page of results.
    ///
    /// Returns `false` if everything is shown or the previous advance has not
    /// been settled with [`Catalog::settle_page`].
    pub fn advance_page(&mut self) -> bool {
        let advanced = self.cursor.advance(self.filtered.len());
        if advanced {
            self.revision += 1;
            self.publish();
        }
        advanced
    }

    /// Complete a pending page advance
    pub fn settle_page(&mut self) {
        if self.cursor.is_pending() {
            self.cursor.settle();
            self.publish();
        }
    }

    fn requery(&mut self) {
        self.cursor.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = query::apply(&self.articles, &self.query, self.clock.today());
        self.revision += 1;
        self.publish();
    }

    fn publish(&self) {
        self.notifier.send_replace(self.stats());
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Every loaded article, in manifest order
    pub fn articles(&self) -> &[Arc<Article>] {
        &self.articles
    }

    /// Articles matching the current query, in sorted order
    pub fn filtered(&self) -> &[Arc<Article>] {
        &self.filtered
    }

    /// The shown prefix of the filtered articles
    pub fn visible(&self) -> &[Arc<Article>] {
        self.cursor.visible_slice(&self.filtered)
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more(self.filtered.len())
    }

    pub fn visible_count(&self) -> usize {
        self.cursor.visible_count()
    }

    pub fn page_size(&self) -> usize {
        self.cursor.page_size()
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn stats(&self) -> CatalogStats {
        let filtered = self.filtered.len();
        CatalogStats {
            total: self.articles.len(),
            filtered,
            shown: self.cursor.shown(filtered),
            has_more: self.cursor.has_more(filtered),
            total_pages: self.cursor.total_pages(filtered),
            pending: self.cursor.is_pending(),
            revision: self.revision,
        }
    }

    /// Find an article by id
    pub fn find(&self, id: &str) -> Option<&Arc<Article>> {
        self.articles.iter().find(|a| a.id.as_str() == id)
    }

    /// Distinct categories across all articles, alphabetically
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut categories: Vec<String> = self
            .articles
            .iter()
            .filter(|a| seen.insert(a.category.to_lowercase()))
            .map(|a| a.category.clone())
            .collect();
        categories.sort_by(|a, b| locale_cmp(a, b));
        categories
    }

    /// Receive updated stats after every load and query change
    pub fn subscribe(&self) -> watch::Receiver<CatalogStats> {
        self.notifier.subscribe()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
