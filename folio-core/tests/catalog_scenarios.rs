//! End-to-end behaviour of the catalog over realistic document sets.

use chrono::NaiveDate;
use folio_core::{
    ArticleDefaults, Catalog, DateRange, DirectorySource, FixedClock, LoadError, LoadStatus,
    MemorySource, QueryState, RawDocument, SortKey,
};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn catalog(page_size: usize) -> Catalog {
    Catalog::new(page_size, ArticleDefaults::default()).with_clock(Arc::new(FixedClock(today())))
}

fn doc(id: &str, title: &str, date: &str, extra: &str, body: &str) -> RawDocument {
    RawDocument::new(
        id,
        format!("---\ntitle: {title}\ndate: {date}\n{extra}---\n{body}"),
    )
}

/// Eight articles, two of which mention "tax"
fn research_set() -> Vec<RawDocument> {
    vec![
        doc("tax-basics.md", "Tax Basics", "2024-06-10", "category: Tax\n", "Filing season notes."),
        doc("markets.md", "Market Outlook", "2024-06-01", "category: Markets\n", "Equities rallied."),
        doc("rates.md", "Rate Watch", "2024-05-20", "category: Economy\n", "The central bank held."),
        doc("housing.md", "Housing Update", "2024-05-01", "category: Economy\n", "Prices cooled."),
        doc("savings.md", "Saving Habits", "2024-04-12", "tags: budgeting, TAX-advantaged\n", "Small steps."),
        doc("crypto.md", "Digital Assets", "2024-03-30", "category: Markets\n", "Volatility remains."),
        doc("energy.md", "Energy Prices", "2024-02-14", "category: Commodities\n", "Oil slipped."),
        doc("retire.md", "Retirement Planning", "2023-12-01", "", "Start early."),
    ]
}

fn titles(articles: &[Arc<folio_core::Article>]) -> Vec<&str> {
    articles.iter().map(|a| a.title.as_str()).collect()
}

#[test]
fn first_page_of_default_view() {
    let mut catalog = catalog(6);
    catalog.load(research_set()).unwrap();

    assert_eq!(catalog.visible().len(), 6);
    assert!(catalog.has_more());
    assert_eq!(catalog.visible()[0].title, "Tax Basics");
    assert_eq!(catalog.visible()[5].title, "Digital Assets");
}

#[test]
fn search_narrows_to_matches() {
    let mut catalog = catalog(6);
    catalog.load(research_set()).unwrap();

    catalog.set_search_text("tax");
    assert_eq!(catalog.filtered().len(), 2);
    assert_eq!(titles(catalog.visible()), vec!["Tax Basics", "Saving Habits"]);
    assert!(!catalog.has_more());
}

#[test]
fn title_sort_keeps_equal_titles_in_input_order() {
    let mut catalog = catalog(6);
    catalog
        .load(vec![
            doc("b.md", "Beta", "2024-01-01", "", "b"),
            doc("a1.md", "Alpha", "2024-01-02", "", "first alpha"),
            doc("a2.md", "Alpha", "2024-01-03", "", "second alpha"),
        ])
        .unwrap();

    assert!(catalog.set_sort_key("title-asc"));
    let ids: Vec<_> = catalog.visible().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2", "b"]);
}

#[test]
fn week_range_uses_clock_date() {
    let mut catalog = catalog(6);
    catalog
        .load(vec![
            doc("recent.md", "Recent", "2024-06-10", "", "x"),
            doc("older.md", "Older", "2024-05-01", "", "y"),
        ])
        .unwrap();

    assert!(catalog.set_date_range_filter("week"));
    assert_eq!(titles(catalog.filtered()), vec!["Recent"]);
}

#[test]
fn rapid_advances_reveal_one_page() {
    let mut catalog = catalog(2);
    catalog.load(research_set()).unwrap();

    assert!(catalog.advance_page());
    assert!(!catalog.advance_page());
    assert_eq!(catalog.visible_count(), 4);
    assert!(catalog.stats().pending);

    catalog.settle_page();
    assert!(!catalog.stats().pending);
    assert!(catalog.advance_page());
    assert_eq!(catalog.visible_count(), 6);
}

#[test]
fn unterminated_front_matter_is_body() {
    let text = "---\ntitle: Never closed\nThe body continues here.";
    let mut catalog = catalog(6);
    catalog.load(vec![RawDocument::new("broken.md", text)]).unwrap();

    let article = catalog.find("broken").unwrap();
    assert!(article.metadata.is_empty());
    assert_eq!(article.content, text);
    assert_eq!(article.title, "Untitled");
    assert_eq!(article.date, today());
}

#[test]
fn parser_is_total_over_odd_inputs() {
    let inputs = ["", "---", "---\n---", "no front matter at all", "\n\n\n", "---\n:\n---\n"];
    let documents = inputs
        .iter()
        .enumerate()
        .map(|(i, text)| RawDocument::new(format!("odd-{i}.md"), *text))
        .collect();

    let mut catalog = catalog(6);
    assert_eq!(catalog.load(documents).unwrap(), inputs.len());
    for article in catalog.articles() {
        assert_eq!(article.title, "Untitled");
        assert_eq!(article.category, "Research");
        assert_eq!(article.author, "Financial Brunch Team");
        assert!(article.read_time >= 1);
        assert!(article.excerpt.chars().count() <= 203);
    }
}

#[test]
fn long_excerpts_are_bounded() {
    let long_body = "word ".repeat(500);
    let long_excerpt = format!("excerpt: {}\n", "x".repeat(400));
    let mut catalog = catalog(6);
    catalog
        .load(vec![
            doc("body.md", "Body", "2024-01-01", "", &long_body),
            doc("meta.md", "Meta", "2024-01-01", &long_excerpt, "short"),
        ])
        .unwrap();

    for article in catalog.articles() {
        assert!(article.excerpt.chars().count() <= 203);
        assert!(article.excerpt.ends_with("..."));
    }
    assert_eq!(catalog.find("body").unwrap().read_time, 3);
}

#[test]
fn additional_filters_never_grow_results() {
    let mut catalog = catalog(6);
    catalog.load(research_set()).unwrap();
    let total = catalog.filtered().len();

    catalog.set_category_filter("Economy");
    let by_category = catalog.filtered().len();
    assert!(by_category <= total);

    catalog.set_date_range_filter("month");
    let by_date = catalog.filtered().len();
    assert!(by_date <= by_category);
    assert_eq!(titles(catalog.filtered()), vec!["Rate Watch"]);

    catalog.set_search_text("housing");
    assert!(catalog.filtered().len() <= by_date);
    assert!(catalog
        .filtered()
        .iter()
        .all(|a| catalog.articles().iter().any(|b| Arc::ptr_eq(a, b))));
}

#[test]
fn advancing_eventually_stops() {
    let mut catalog = catalog(3);
    catalog.load(research_set()).unwrap();

    let mut previous = catalog.visible_count();
    while catalog.has_more() {
        assert!(catalog.advance_page());
        assert_eq!(catalog.visible_count(), (previous + 3).min(8));
        previous = catalog.visible_count();
        catalog.settle_page();
    }
    assert_eq!(catalog.visible().len(), 8);
    assert!(!catalog.advance_page());
    assert_eq!(catalog.visible_count(), 8);
}

fn grow(catalog: &mut Catalog) {
    catalog.advance_page();
    catalog.settle_page();
    catalog.advance_page();
    catalog.settle_page();
    assert!(catalog.visible_count() > 2);
}

#[test]
fn every_mutation_resets_to_one_page() {
    let mut catalog = catalog(2);
    catalog.load(research_set()).unwrap();

    grow(&mut catalog);
    catalog.set_search_text("");
    assert_eq!(catalog.visible_count(), 2);

    grow(&mut catalog);
    catalog.set_category_filter("all");
    assert_eq!(catalog.visible_count(), 2);

    grow(&mut catalog);
    catalog.set_date_range_filter("year");
    assert_eq!(catalog.visible_count(), 2);

    grow(&mut catalog);
    catalog.set_sort(SortKey::DateAsc);
    assert_eq!(catalog.visible_count(), 2);
}

#[test]
fn clear_filters_restores_defaults_and_one_page() {
    let mut catalog = catalog(2);
    catalog.load(research_set()).unwrap();
    let default_order: Vec<_> = catalog.filtered().iter().map(|a| a.id.clone()).collect();

    catalog.set_search_text("e");
    catalog.set_category_filter("Markets");
    catalog.set_author_filter("Financial Brunch Team");
    assert!(catalog.set_date_range_filter("year"));
    assert!(catalog.set_sort_key("title-desc"));
    assert_ne!(catalog.query(), &QueryState::default());

    catalog.clear_filters();
    grow(&mut catalog);
    catalog.set_sort(SortKey::Category);
    catalog.set_date_range(DateRange::Quarter);
    catalog.advance_page();
    catalog.settle_page();
    assert!(catalog.visible_count() > catalog.page_size());

    catalog.clear_filters();
    assert_eq!(catalog.query(), &QueryState::default());
    assert_eq!(catalog.visible_count(), catalog.page_size());
    assert_eq!(catalog.filtered().len(), 8);
    let ids: Vec<_> = catalog.filtered().iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, default_order);
}

#[test]
fn repeated_search_is_idempotent() {
    let mut catalog = catalog(1);
    catalog.load(research_set()).unwrap();

    catalog.set_search_text("tax");
    let first: Vec<_> = catalog.filtered().iter().map(|a| a.id.clone()).collect();
    assert_eq!(first.len(), 2);

    assert!(catalog.advance_page());
    catalog.settle_page();
    assert_eq!(catalog.visible_count(), 2);

    catalog.set_search_text("tax");
    let second: Vec<_> = catalog.filtered().iter().map(|a| a.id.clone()).collect();
    assert_eq!(second, first);
    assert_eq!(catalog.visible_count(), 1);
    assert!(catalog.has_more());
}

#[test]
fn failed_load_keeps_previous_articles() {
    let mut catalog = catalog(6);
    catalog.load(research_set()).unwrap();
    catalog.set_search_text("tax");

    let result = catalog.load(vec![
        RawDocument::new("dup.md", "one"),
        RawDocument::new("dup.markdown", "two"),
    ]);
    assert!(matches!(result, Err(LoadError::DuplicateId(_))));
    assert_eq!(catalog.articles().len(), 8);
    assert_eq!(catalog.filtered().len(), 2);
    assert!(matches!(catalog.status(), LoadStatus::Failed { .. }));
}

#[tokio::test]
async fn load_and_refresh_from_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("manifest.json"), r#"{"files": ["a.md"]}"#).unwrap();
    fs::write(dir.path().join("a.md"), "---\ntitle: First\n---\nBody").unwrap();

    let mut catalog = catalog(6);
    let count = catalog
        .load_from(Arc::new(DirectorySource::new(dir.path())))
        .await
        .unwrap();
    assert_eq!(count, 1);

    fs::write(dir.path().join("manifest.json"), r#"{"files": ["a.md", "b.md"]}"#).unwrap();
    fs::write(dir.path().join("b.md"), "---\ntitle: Second\n---\nBody").unwrap();
    assert_eq!(catalog.refresh().await.unwrap(), 2);
    assert_eq!(catalog.status(), &LoadStatus::Ready { count: 2 });
}

#[tokio::test]
async fn refresh_failure_keeps_articles() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("manifest.json"), r#"{"files": ["a.md"]}"#).unwrap();
    fs::write(dir.path().join("a.md"), "Body").unwrap();

    let mut catalog = catalog(6);
    catalog
        .load_from(Arc::new(DirectorySource::new(dir.path())))
        .await
        .unwrap();

    fs::write(dir.path().join("manifest.json"), "not json").unwrap();
    assert!(matches!(
        catalog.refresh().await,
        Err(LoadError::Manifest(_))
    ));
    assert_eq!(catalog.articles().len(), 1);
}

#[tokio::test]
async fn refresh_without_source() {
    let mut catalog = catalog(6);
    assert!(matches!(catalog.refresh().await, Err(LoadError::NoSource)));
}

#[tokio::test]
async fn subscribers_observe_loads() {
    let source = MemorySource::new()
        .with_document("one.md", "---\ncategory: Tax\n---\nA")
        .with_document("two.md", "---\ncategory: Markets\n---\nB");

    let mut catalog = catalog(1);
    let mut stats = catalog.subscribe();
    catalog.load_from(Arc::new(source)).await.unwrap();

    stats.changed().await.unwrap();
    let snapshot = *stats.borrow_and_update();
    assert_eq!(snapshot.total, 2);
    assert_eq!(snapshot.shown, 1);
    assert!(snapshot.has_more);
    assert_eq!(catalog.categories(), vec!["Markets", "Tax"]);
}
