//! # News Aggregator
//!
//! Fetches stories from the Hacker News API and a handful of RSS/Atom feeds,
//! merges them into one newest-first list and renders a static HTML page
//! from a template.
//!
//! ## Usage
//!
//! ```sh
//! news_aggregator --output-file public/index.html
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Fetching**: each configured source is fetched in order
//! 2. **Normalizing**: raw items become [`models::Record`]s
//! 3. **Merging**: all records are stably sorted newest first
//! 4. **Rendering**: the template is rendered and written to disk
//!
//! A source that fails is logged and skipped. A template or write failure
//! ends the run with an error.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod sources;
mod utils;

use cli::Cli;
use config::{Config, SourceDescriptor};
use http::{Fetch, HttpFetcher};
use outputs::html;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_aggregator starting up");

    let args = Cli::parse();
    debug!(?args.output_file, ?args.template, ?args.config, "Parsed CLI arguments");

    let config = Config::load(args.config.as_deref()).await?;
    let fetcher = HttpFetcher::new(&config)?;

    let count = build_page(&fetcher, &config.sources, &args.template, &args.output_file).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = count,
        "Execution complete"
    );
    println!(
        "Successfully generated HTML file at: {}",
        args.output_file.display()
    );
    Ok(())
}

/// Fetch every source, render the page and write it to `output_file`.
///
/// Returns the number of records on the page.
#[instrument(level = "info", skip(fetcher, sources))]
async fn build_page<F: Fetch>(
    fetcher: &F,
    sources: &[SourceDescriptor],
    template: &Path,
    output_file: &Path,
) -> error::Result<usize> {
    let news_items = aggregate::aggregate(fetcher, sources).await;

    let generated_at = models::display_time(&Utc::now());
    let page = html::render_page(template, &news_items, &generated_at).await?;
    html::write_page(output_file, &page).await?;

    Ok(news_items.len())
}
