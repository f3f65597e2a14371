//! Command-line interface definitions.
//!
//! Paths can be given as flags; the template and config paths can also come
//! from environment variables.

use clap::Parser;
use std::path::PathBuf;

/// Build a static news page from Hacker News and a set of RSS/Atom feeds.
///
/// # Examples
///
/// ```sh
/// # Write ./index.html using ./template.html and the built-in sources
/// news_aggregator
///
/// # Custom destination and source list
/// news_aggregator --output-file public/index.html --config sources.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path and filename for the output HTML file
    #[arg(short, long, default_value = "index.html")]
    pub output_file: PathBuf,

    /// Template used to render the page
    #[arg(short, long, env = "NEWS_TEMPLATE", default_value = "template.html")]
    pub template: PathBuf,

    /// Optional YAML file replacing the built-in source list
    #[arg(short, long, env = "NEWS_CONFIG")]
    pub config: Option<PathBuf>,
}
