//! Hacker News API source.
//!
//! One listing call (`topstories.json`) returns story ids; each of the first
//! `limit` ids gets its own detail call (`item/{id}.json`). Items are kept
//! loosely typed as a JSON map and converted with explicit presence checks.
//!
//! Any failed call abandons the whole source: records gathered from earlier
//! items are dropped along with the error.

use crate::config::SourceDescriptor;
use crate::error::Result;
use crate::http::Fetch;
use crate::models::{FALLBACK_AUTHOR, Record};
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};
use url::Url;

/// Raw item as returned by the detail endpoint.
pub type RawItem = Map<String, Value>;

/// Fetch the first `source.limit` top stories and normalize them.
#[instrument(level = "info", skip_all, fields(source = %source.label))]
pub async fn fetch<F: Fetch>(fetcher: &F, source: &SourceDescriptor) -> Result<Vec<Record>> {
    let base = api_base(&source.endpoint)?;

    let listing = fetcher.fetch(base.join("topstories.json")?.as_str()).await?;
    let ids: Vec<u64> = serde_json::from_slice(&listing).inspect_err(|_| {
        debug!(
            body_preview = %truncate_for_log(&String::from_utf8_lossy(&listing), 300),
            "Story listing is not a list of ids"
        );
    })?;
    debug!(listed = ids.len(), limit = source.limit, "Fetched story listing");

    let mut records = Vec::new();
    for id in ids.iter().take(source.limit) {
        let body = fetcher.fetch(base.join(&format!("item/{id}.json"))?.as_str()).await?;
        // Deleted items come back as `null`.
        let item: Option<RawItem> = serde_json::from_slice(&body)?;

        match item.and_then(|item| normalize(&source.label, &item)) {
            Some(record) => records.push(record),
            None => debug!(id, "Skipping item without url or title"),
        }
    }

    info!(count = records.len(), "Fetched Hacker News stories");
    Ok(records)
}

/// Convert one raw item into a [`Record`].
///
/// Returns `None` when the item has no non-empty `url` or `title` (self
/// posts, polls, jobs without links). Every other missing field falls back:
/// `score` to `0`, `by` to `"anon"`, `time` to the Unix epoch.
pub fn normalize(label: &str, item: &RawItem) -> Option<Record> {
    let title = non_empty_str(item, "title")?;
    let link = non_empty_str(item, "url")?;

    let score = item.get("score").and_then(Value::as_i64).unwrap_or(0);
    let author = non_empty_str(item, "by").unwrap_or(FALLBACK_AUTHOR);
    let time_posted = item
        .get("time")
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Some(Record::new(
        label,
        title,
        link,
        format!("{score} points, by {author}"),
        time_posted,
    ))
}

fn non_empty_str<'a>(item: &'a RawItem, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// The configured endpoint with a trailing slash, so relative joins stay under it.
fn api_base(endpoint: &str) -> Result<Url> {
    if endpoint.ends_with('/') {
        Ok(Url::parse(endpoint)?)
    } else {
        Ok(Url::parse(&format!("{endpoint}/"))?)
    }
}
