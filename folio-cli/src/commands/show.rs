//! Fetch a single article.

use crate::payload;
use crate::session::{open_catalog, SessionOptions};
use anyhow::{Context, Result};
use folio_core::{ArticleId, PreviewLine};

/// Print one article, in full or as a bounded preview
pub async fn show_article(
    session: &SessionOptions,
    id: &str,
    preview_lines: Option<usize>,
    json: bool,
) -> Result<()> {
    let catalog = open_catalog(session).await?;

    // Accept the document name too (`tax-basics.md`)
    let article = catalog
        .find(id)
        .or_else(|| catalog.find(ArticleId::from_document(id).as_str()))
        .with_context(|| format!("Article '{}' not found", id))?;

    if json {
        let payload = payload::envelope(
            "catalog.article",
            payload::article_to_payload(article, preview_lines),
        );
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("{}", article.title);
    println!(
        "{} · {} · {} · {} min read",
        article.category,
        article.display_date(),
        article.author,
        article.read_time
    );
    if !article.tags.is_empty() {
        println!("Tags: {}", article.tags.join(", "));
    }
    println!();

    match preview_lines {
        Some(max_lines) => {
            let preview = article.preview(max_lines);
            for line in &preview.lines {
                match line {
                    PreviewLine::Heading { level, text } => {
                        println!("{} {}", "#".repeat(*level as usize), text)
                    }
                    PreviewLine::Paragraph { text } => println!("{text}"),
                    PreviewLine::Break => println!(),
                }
            }
            if preview.truncated {
                println!("...");
            }
        }
        None => println!("{}", article.content),
    }

    Ok(())
}
