//! pagesift command line entry point.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagesift_client::{PatternDetector, Scraper, UrlDetector, assemble_messages, split_message};
use pagesift_core::{AppConfig, CacheDb};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "pagesift", about = "Scrape web pages into cached, normalized text", version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a URL, serving from cache when possible.
    Scrape {
        url: String,

        /// Skip the cache read and fetch again.
        #[arg(long)]
        refresh: bool,
    },

    /// List the URLs found in a piece of text.
    Detect { text: String },

    /// Build the chat messages for a user message, scraping any URL in it.
    Prompt { message: String },

    /// Evict one URL's entry, or delete expired entries when no URL is given.
    Purge {
        #[arg(long)]
        url: Option<String>,
    },
}

fn load_config() -> Result<AppConfig> {
    AppConfig::load().context("failed to load configuration")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Detect { text } => print_json(&PatternDetector.find_all(&text)),
        Commands::Scrape { url, refresh } => {
            let scraper = Scraper::from_config(&load_config()?).await?;
            let content = if refresh { scraper.refresh(&url).await } else { scraper.scrape(&url).await };
            print_json(&content)
        }
        Commands::Prompt { message } => {
            let split = split_message(&PatternDetector, &message);
            let page_text = match split.url.as_deref() {
                Some(url) => Scraper::from_config(&load_config()?).await?.scrape(url).await.content,
                None => String::new(),
            };
            print_json(&assemble_messages(Vec::new(), &split.query, &page_text))
        }
        Commands::Purge { url: Some(url) } => {
            let scraper = Scraper::from_config(&load_config()?).await?;
            scraper.cache().evict(&url).await?;
            print_json(&serde_json::json!({ "evicted": url }))
        }
        Commands::Purge { url: None } => {
            let config = load_config()?;
            let db = CacheDb::open(&config.db_path)
                .await
                .with_context(|| format!("failed to open cache at {}", config.db_path.display()))?;
            let deleted = db.purge_expired().await?;
            print_json(&serde_json::json!({ "deleted": deleted }))
        }
    }
}
