//! List the categories in use.

use crate::payload;
use crate::session::{open_catalog, SessionOptions};
use anyhow::Result;

pub async fn list_categories(session: &SessionOptions, json: bool) -> Result<()> {
    let catalog = open_catalog(session).await?;

    let categories: Vec<payload::CategoryCount> = catalog
        .categories()
        .into_iter()
        .map(|name| {
            let key = name.to_lowercase();
            let count = catalog
                .articles()
                .iter()
                .filter(|article| article.category.to_lowercase() == key)
                .count();
            payload::CategoryCount { name, count }
        })
        .collect();

    if json {
        let data = payload::CategoriesData {
            total: catalog.articles().len(),
            categories,
        };
        let json = serde_json::to_string_pretty(&payload::envelope("catalog.categories", data))?;
        println!("{json}");
        return Ok(());
    }

    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    for category in &categories {
        println!("{:<24} {}", category.name, category.count);
    }

    Ok(())
}
