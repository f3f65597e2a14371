//! RSS/Atom feed source.
//!
//! The feed is fetched once and parsed with `feed-rs`. Entries are taken in
//! feed order, at most `limit` of them, and summaries are cleaned of images.
//!
//! # Malformed feeds
//!
//! `feed-rs` rejects documents it cannot parse outright. When that happens
//! the document is repaired (lossy UTF-8, BOM and anything before the first
//! `<` dropped, characters illegal in XML 1.0 removed) and parsed once more.
//! If the repaired copy parses, the original error is reported as a
//! malformed-feed warning and the recovered entries are used.

use crate::config::SourceDescriptor;
use crate::error::Result;
use crate::http::Fetch;
use crate::models::{FALLBACK_DESCRIPTION, FALLBACK_LINK, FALLBACK_TITLE, Record};
use crate::utils::{strip_images, truncate_for_log};
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser::{self, ParseFeedError};
use tracing::{debug, info, instrument, warn};

/// Entries recovered from a feed document.
#[derive(Debug)]
pub struct ParsedFeed {
    pub entries: Vec<Entry>,
    /// Set when the entries only came out of the repaired document.
    pub malformed: Option<ParseFeedError>,
}

/// Fetch, parse and normalize one feed.
#[instrument(level = "info", skip_all, fields(source = %source.label, url = %source.endpoint))]
pub async fn fetch<F: Fetch>(fetcher: &F, source: &SourceDescriptor) -> Result<Vec<Record>> {
    let raw = fetcher.fetch(&source.endpoint).await?;
    let parsed = parse(&raw).inspect_err(|_| {
        debug!(
            body_preview = %truncate_for_log(&String::from_utf8_lossy(&raw), 300),
            "Feed body could not be parsed"
        );
    })?;

    if let Some(problem) = &parsed.malformed {
        warn!(
            source = %source.label,
            error = %problem,
            "Feed is malformed; continuing with recovered entries"
        );
    }

    let now = Utc::now();
    let records: Vec<Record> = parsed
        .entries
        .iter()
        .take(source.limit)
        .map(|entry| normalize(&source.label, entry, now))
        .collect();

    info!(
        available = parsed.entries.len(),
        count = records.len(),
        "Fetched feed entries"
    );
    Ok(records)
}

/// Parse a feed document, falling back to a repaired copy when it is malformed.
pub fn parse(raw: &[u8]) -> Result<ParsedFeed> {
    let err = match parser::parse(raw) {
        Ok(feed) => {
            return Ok(ParsedFeed {
                entries: feed.entries,
                malformed: None,
            });
        }
        Err(err) => err,
    };

    let repaired = repair(raw);
    if repaired.as_bytes() == raw {
        return Err(err.into());
    }

    match parser::parse(repaired.as_bytes()) {
        Ok(feed) => Ok(ParsedFeed {
            entries: feed.entries,
            malformed: Some(err),
        }),
        Err(_) => Err(err.into()),
    }
}

/// Best-effort cleanup of a feed document that failed to parse.
fn repair(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim_start_matches('\u{feff}');
    let text = match text.find('<') {
        Some(start) => &text[start..],
        None => text,
    };
    text.chars().filter(|c| is_xml_char(*c)).collect()
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Convert one feed entry into a [`Record`].
///
/// `now` stands in for entries without a published timestamp. The raw
/// description is the summary, else the content body, else a placeholder;
/// images are stripped from it before it is stored.
pub fn normalize(label: &str, entry: &Entry, now: DateTime<Utc>) -> Record {
    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(FALLBACK_TITLE);

    let link = entry_link(entry).unwrap_or(FALLBACK_LINK);

    let raw_description = entry
        .summary
        .as_ref()
        .map(|s| s.content.as_str())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            entry
                .content
                .as_ref()
                .and_then(|c| c.body.as_deref())
                .filter(|s| !s.trim().is_empty())
        })
        .unwrap_or(FALLBACK_DESCRIPTION);

    Record::new(
        label,
        title,
        link,
        strip_images(raw_description),
        entry.published.unwrap_or(now),
    )
}

/// The entry's alternate link, else its first link.
fn entry_link(entry: &Entry) -> Option<&str> {
    entry
        .links
        .iter()
        .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.as_str())
        .filter(|href| !href.trim().is_empty())
}
