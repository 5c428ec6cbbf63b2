//! CLI command implementations.

pub mod categories;
pub mod list;
pub mod show;

pub use categories::list_categories;
pub use list::{list_articles, ListOptions};
pub use show::show_article;
