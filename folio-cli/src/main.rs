//! # folio CLI
//!
//! Command-line interface for browsing a folio article catalog.

mod commands;
mod payload;
mod session;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "folio.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding manifest.json and the documents (overrides source.root)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today for date ranges and missing dates
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles matching a query, newest first by default
    List {
        /// Case-insensitive text matched against title, excerpt and tags
        #[arg(long, short)]
        search: Option<String>,

        /// Only articles in this category ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Only articles by this author ("all" for every author)
        #[arg(long)]
        author: Option<String>,

        /// all, week, month, quarter or year
        #[arg(long)]
        date_range: Option<String>,

        /// date-desc, date-asc, title-asc, title-desc or category
        #[arg(long)]
        sort: Option<String>,

        /// Number of pages to reveal
        #[arg(long, default_value_t = 1)]
        pages: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single article
    Show {
        /// Article id (document name without extension)
        id: String,

        /// Print only the leading lines of the body
        #[arg(long)]
        preview_lines: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the categories in use
    Categories {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let session = session::SessionOptions {
        config_path: cli.config,
        root: cli.root,
        today: cli.today,
    };

    match cli.command {
        Commands::List {
            search,
            category,
            author,
            date_range,
            sort,
            pages,
            json,
        } => {
            let opts = commands::ListOptions {
                search,
                category,
                author,
                date_range,
                sort,
                pages,
                json,
            };
            commands::list_articles(&session, opts).await
        }
        Commands::Show {
            id,
            preview_lines,
            json,
        } => commands::show_article(&session, &id, preview_lines, json).await,
        Commands::Categories { json } => commands::list_categories(&session, json).await,
    }
}
