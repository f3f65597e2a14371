//! Content sources and their per-kind normalization.
//!
//! # Supported Sources
//!
//! | Kind | Module | Method | Notes |
//! |------|--------|--------|-------|
//! | `hacker_news` | [`hacker_news`] | JSON API | Listing call, then one call per item |
//! | `feed` | [`feed`] | RSS/Atom | One call, parsed with `feed-rs` |
//!
//! Every source is fetched through [`fetch_source`], which turns any error
//! into a [`SourceOutcome::Failed`] so one broken source never stops the run.

pub mod feed;
pub mod hacker_news;

use crate::config::{SourceDescriptor, SourceKind};
use crate::error::Error;
use crate::http::Fetch;
use crate::models::Record;

/// What one source contributed to the run.
#[derive(Debug)]
pub enum SourceOutcome {
    Fetched(Vec<Record>),
    /// Nothing from this source is used, including items read before the error.
    Failed(Error),
}

/// Fetch one source with the fetcher matching its kind.
pub async fn fetch_source<F: Fetch>(fetcher: &F, source: &SourceDescriptor) -> SourceOutcome {
    let result = match source.kind {
        SourceKind::HackerNews => hacker_news::fetch(fetcher, source).await,
        SourceKind::Feed => feed::fetch(fetcher, source).await,
    };

    match result {
        Ok(records) => SourceOutcome::Fetched(records),
        Err(e) => SourceOutcome::Failed(e),
    }
}
