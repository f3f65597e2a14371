//! Source configuration.
//!
//! The source table is fixed at build time ([`Config::default`]) and can be
//! replaced by an optional YAML file. Source order is fetch order.
//!
//! ```yaml
//! request_timeout_secs: 30
//! sources:
//!   - kind: hacker_news
//!     label: Hacker News
//!     endpoint: https://hacker-news.firebaseio.com/v0
//!     limit: 15
//!   - kind: feed
//!     label: Lobsters
//!     endpoint: https://lobste.rs/rss
//!     limit: 15
//! ```

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Items taken from each source unless configured otherwise.
pub const DEFAULT_LIMIT: usize = 15;

pub const HACKER_NEWS_API: &str = "https://hacker-news.firebaseio.com/v0";

/// How a source is fetched and normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Listing call plus one detail call per item (Hacker News API shape).
    HackerNews,
    /// RSS or Atom feed.
    Feed,
}

/// One configured source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    /// Display name carried into every record from this source.
    pub label: String,
    /// API base for `hacker_news`, feed URL for `feed`.
    pub endpoint: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl SourceDescriptor {
    pub fn hacker_news(endpoint: &str, limit: usize) -> Self {
        Self {
            kind: SourceKind::HackerNews,
            label: "Hacker News".to_string(),
            endpoint: endpoint.to_string(),
            limit,
        }
    }

    pub fn feed(endpoint: &str, label: &str, limit: usize) -> Self {
        Self {
            kind: SourceKind::Feed,
            label: label.to_string(),
            endpoint: endpoint.to_string(),
            limit,
        }
    }
}

/// Runtime configuration for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-request timeout. `0` disables it.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub sources: Vec<SourceDescriptor>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: format!("news_aggregator/{}", env!("CARGO_PKG_VERSION")),
            sources: vec![
                SourceDescriptor::hacker_news(HACKER_NEWS_API, DEFAULT_LIMIT),
                SourceDescriptor::feed("https://lobste.rs/rss", "Lobsters", DEFAULT_LIMIT),
                SourceDescriptor::feed(
                    "https://www.abc.net.au/news/feed/2942460/rss.xml",
                    "ABC",
                    DEFAULT_LIMIT,
                ),
                SourceDescriptor::feed(
                    "https://old.reddit.com/r/selfhosted/top/.rss?t=day",
                    "r/selfhosted",
                    DEFAULT_LIMIT,
                ),
                SourceDescriptor::feed(
                    "https://old.reddit.com/r/technology/top/.rss?t=day",
                    "r/technology",
                    DEFAULT_LIMIT,
                ),
            ],
        }
    }
}

impl Config {
    /// Parse a YAML document and check every endpoint is a valid URL.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        for source in &config.sources {
            Url::parse(&source.endpoint)?;
        }
        Ok(config)
    }

    /// Load the config file at `path`, or the built-in defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            info!("No config file given; using built-in sources");
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&content)?;
        info!(
            path = %path.display(),
            sources = config.sources.len(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
