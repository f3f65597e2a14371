//! Merge every configured source into one time-ordered list.

use crate::config::SourceDescriptor;
use crate::http::Fetch;
use crate::models::Record;
use crate::sources::{SourceOutcome, fetch_source};
use tracing::{error, info, instrument};

/// Fetch each source in order, concatenate their records and sort newest first.
///
/// Sources are fetched one at a time. A failed source contributes nothing and
/// the loop moves on. The sort is stable, so records with equal timestamps
/// keep the order they were fetched in.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn aggregate<F: Fetch>(fetcher: &F, sources: &[SourceDescriptor]) -> Vec<Record> {
    let mut records = Vec::new();
    let mut failed = 0usize;

    for source in sources {
        match fetch_source(fetcher, source).await {
            SourceOutcome::Fetched(batch) => records.extend(batch),
            SourceOutcome::Failed(e) => {
                failed += 1;
                error!(
                    source = %source.label,
                    endpoint = %source.endpoint,
                    error = %e,
                    "Error fetching source; skipping it for this run"
                );
            }
        }
    }

    sort_newest_first(&mut records);

    info!(
        total = records.len(),
        failed_sources = failed,
        "Aggregated all sources"
    );
    records
}

/// Stable sort by `time_posted`, descending.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.time_posted.cmp(&a.time_posted));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::stub::StubFetcher;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(source: &str, title: &str, secs: i64) -> Record {
        Record::new(source, title, "#", "", at(secs))
    }

    fn rss_item(title: &str, pub_date: &str) -> String {
        format!("<item><title>{title}</title><link>http://x.test/{title}</link><pubDate>{pub_date}</pubDate></item>")
    }

    fn rss(items: &[String]) -> String {
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>T</title><link>http://x.test/</link><description>d</description>{}</channel></rss>"#,
            items.concat()
        )
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut records = vec![
            record("a", "old", 100),
            record("a", "tie-1", 200),
            record("b", "new", 300),
            record("b", "tie-2", 200),
            record("c", "tie-3", 200),
        ];

        sort_newest_first(&mut records);
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, ["new", "tie-1", "tie-2", "tie-3", "old"]);
        assert!(records
            .windows(2)
            .all(|w| w[0].time_posted >= w[1].time_posted));
    }

    #[tokio::test]
    async fn test_failing_feed_does_not_stop_others() {
        let fetcher = StubFetcher::new().with(
            "http://ok.test/rss",
            rss(&[
                rss_item("middle", "Tue, 06 May 2025 12:00:00 +0000"),
                rss_item("oldest", "Tue, 06 May 2025 08:00:00 +0000"),
                rss_item("newest", "Tue, 06 May 2025 16:00:00 +0000"),
            ]),
        );
        let sources = vec![
            SourceDescriptor::feed("http://down.test/rss", "Down", 15),
            SourceDescriptor::feed("http://ok.test/rss", "Ok", 15),
        ];

        let records = aggregate(&fetcher, &sources).await;
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, ["newest", "middle", "oldest"]);
        assert!(records.iter().all(|r| r.source.as_str() == "Ok"));
    }

    #[tokio::test]
    async fn test_sources_are_fetched_in_configured_order() {
        let fetcher = StubFetcher::new()
            .with("http://hn.test/v0/topstories.json", "[1]")
            .with(
                "http://hn.test/v0/item/1.json",
                r#"{"url":"http://a","title":"A","time":1000}"#,
            )
            .with(
                "http://feed.test/rss",
                rss(&[rss_item("F", "Thu, 01 Jan 1970 00:16:40 +0000")]),
            );
        let sources = vec![
            SourceDescriptor::hacker_news("http://hn.test/v0", 15),
            SourceDescriptor::feed("http://feed.test/rss", "Feed", 15),
        ];

        let records = aggregate(&fetcher, &sources).await;

        assert_eq!(
            fetcher.requested(),
            [
                "http://hn.test/v0/topstories.json",
                "http://hn.test/v0/item/1.json",
                "http://feed.test/rss",
            ]
        );
        // Same timestamp: fetch order wins.
        let sources_in_order: Vec<_> = records.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources_in_order, ["Hacker News", "Feed"]);
    }

    #[tokio::test]
    async fn test_all_sources_failing_gives_empty_page() {
        let fetcher = StubFetcher::new();
        let sources = vec![
            SourceDescriptor::hacker_news("http://hn.test/v0", 15),
            SourceDescriptor::feed("http://down.test/rss", "Down", 15),
        ];

        assert!(aggregate(&fetcher, &sources).await.is_empty());
    }
}
