//! Data model shared by every source.
//!
//! Each source kind maps its raw items onto a single [`Record`] shape. The
//! fallback constants below are what a record carries when the upstream item
//! leaves a field out.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Format used for [`Record::display_time`] and the page's "generated at" stamp.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Title used when a feed entry has none.
pub const FALLBACK_TITLE: &str = "No Title";

/// Link used when a feed entry has none.
pub const FALLBACK_LINK: &str = "#";

/// Raw description used when a feed entry has neither summary nor content.
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Author used when a Hacker News item has no `by` field.
pub const FALLBACK_AUTHOR: &str = "anon";

/// Render a timestamp the way records and the page footer show it.
pub fn display_time(time: &DateTime<Utc>) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// One normalized news item.
///
/// Build records with [`Record::new`], which derives `display_time` from
/// `time_posted` so the two always agree. Records are not modified after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Label of the source this record came from (e.g. `"Lobsters"`).
    pub source: String,
    pub title: String,
    pub link: String,
    /// Short summary. For feed sources this is HTML with images removed.
    pub description: String,
    /// Always UTC.
    pub time_posted: DateTime<Utc>,
    /// `time_posted` rendered with [`DISPLAY_TIME_FORMAT`].
    pub display_time: String,
}

impl Record {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
        time_posted: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            link: link.into(),
            description: description.into(),
            display_time: display_time(&time_posted),
            time_posted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_time_is_derived_from_time_posted() {
        let t = Utc.with_ymd_and_hms(2025, 5, 6, 14, 3, 9).unwrap();
        let record = Record::new("Lobsters", "Title", "https://l.example", "", t);

        assert_eq!(record.display_time.as_str(), "2025-05-06 14:03:09 UTC");
        assert_eq!(record.display_time.as_str(), t.format(DISPLAY_TIME_FORMAT).to_string());
    }

    #[test]
    fn test_epoch_display_time() {
        let record = Record::new("Hacker News", "A", "http://a", "", DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(record.display_time.as_str(), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_record_serialization_exposes_template_fields() {
        let t = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let record = Record::new("ABC", "Headline", "https://abc.example/1", "<p>x</p>", t);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "ABC");
        assert_eq!(json["title"], "Headline");
        assert_eq!(json["link"], "https://abc.example/1");
        assert_eq!(json["description"], "<p>x</p>");
        assert_eq!(json["display_time"], "2025-01-02 03:04:05 UTC");
        assert_eq!(json["time_posted"], "2025-01-02T03:04:05Z");
    }
}
