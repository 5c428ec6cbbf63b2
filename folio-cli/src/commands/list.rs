//! List command implementation

use crate::payload;
use crate::session::{open_catalog, SessionOptions};
use anyhow::{bail, Result};
use folio_core::{Article, Catalog, DateRange, QueryState, SortKey};

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date_range: Option<String>,
    pub sort: Option<String>,
    pub pages: usize,
    pub json: bool,
}

/// Print the visible page(s) of articles matching the query
pub async fn list_articles(session: &SessionOptions, opts: ListOptions) -> Result<()> {
    let mut catalog = open_catalog(session).await?;
    apply_query(&mut catalog, &opts)?;

    for _ in 1..opts.pages {
        if !catalog.advance_page() {
            break;
        }
        catalog.settle_page();
    }

    let stats = catalog.stats();

    if opts.json {
        let data = payload::ListData {
            query: catalog.query().clone(),
            stats,
            articles: catalog
                .visible()
                .iter()
                .map(|article| payload::article_summary(article))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&payload::envelope("catalog.list", data))?;
        println!("{json}");
        return Ok(());
    }

    if catalog.visible().is_empty() {
        if stats.total == 0 {
            println!("No articles in the catalog");
        } else {
            println!("No articles match the current filters");
        }
        return Ok(());
    }

    if stats.is_filtered() {
        println!(
            "\nShowing {} of {} articles ({} in catalog):\n",
            stats.shown, stats.filtered, stats.total
        );
    } else {
        println!("\nShowing {} of {} articles:\n", stats.shown, stats.total);
    }

    if !catalog.query().is_unfiltered() {
        println!("Filters: {}\n", describe_query(catalog.query()));
    }

    for article in catalog.visible() {
        print_article(article);
    }

    if stats.has_more {
        println!(
            "  ... {} more (use --pages {} to see everything)",
            stats.filtered - stats.shown,
            stats.total_pages
        );
    }

    Ok(())
}

/// Apply the command-line query to a freshly loaded catalog
fn apply_query(catalog: &mut Catalog, opts: &ListOptions) -> Result<()> {
    if let Some(search) = &opts.search {
        catalog.set_search_text(search);
    }
    if let Some(category) = &opts.category {
        catalog.set_category_filter(category);
    }
    if let Some(author) = &opts.author {
        catalog.set_author_filter(author);
    }
    if let Some(range) = &opts.date_range {
        if !catalog.set_date_range_filter(range) {
            let valid: Vec<_> = DateRange::ALL.iter().map(DateRange::as_str).collect();
            bail!("Unknown date range '{}' (expected {})", range, valid.join(", "));
        }
    }
    if let Some(sort) = &opts.sort {
        if !catalog.set_sort_key(sort) {
            let valid: Vec<_> = SortKey::ALL.iter().map(SortKey::as_str).collect();
            bail!("Unknown sort key '{}' (expected {})", sort, valid.join(", "));
        }
    }
    Ok(())
}

/// One-line summary of the active search and filters
fn describe_query(query: &QueryState) -> String {
    let mut parts = Vec::new();
    if !query.search.is_empty() {
        parts.push(format!("search \"{}\"", query.search));
    }
    if !query.category.is_all() {
        parts.push(format!("category {}", query.category));
    }
    if !query.author.is_all() {
        parts.push(format!("author {}", query.author));
    }
    if query.date_range != DateRange::All {
        parts.push(format!("within the last {}", query.date_range));
    }
    parts.join(", ")
}

fn print_article(article: &Article) {
    // Format:
    // [Tax] Tax Basics
    //   tax-basics · June 10, 2024 · Jane Analyst · 2 min read
    //   Filing season notes...
    //
    let marker = if article.featured { " *" } else { "" };
    println!("[{}] {}{}", article.category, article.title, marker);
    println!(
        "  {} · {} · {} · {} min read",
        article.id,
        article.display_date(),
        article.author,
        article.read_time
    );
    if !article.excerpt.is_empty() {
        println!("  {}", article.excerpt);
    }
    println!();
}
