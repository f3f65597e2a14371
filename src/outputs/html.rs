//! HTML page rendering and writing.
//!
//! The page layout lives in an external Jinja-style template rendered with
//! `minijinja`. Auto-escaping is off for every template, whatever its
//! extension: descriptions are already markup, and templates escape
//! explicitly with `|e` where they need it.

use crate::error::Result;
use crate::models::Record;
use minijinja::{AutoEscape, Environment, context};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render `template_source` with the records and the generation stamp.
///
/// `template_name` only names the template in error messages.
pub fn render(
    template_name: &str,
    template_source: &str,
    news_items: &[Record],
    generated_at: &str,
) -> Result<String> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_name: &str| AutoEscape::None);
    let template = env.template_from_named_str(template_name, template_source)?;
    let page = template.render(context! {
        news_items => news_items,
        generated_at => generated_at
    })?;
    Ok(page)
}

/// Load the template file at `template_path` and render the page.
#[instrument(level = "info", skip(news_items), fields(template = %template_path.display(), items = news_items.len()))]
pub async fn render_page(
    template_path: &Path,
    news_items: &[Record],
    generated_at: &str,
) -> Result<String> {
    let source = fs::read_to_string(template_path).await?;
    let name = template_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("template.html");

    let page = render(name, &source, news_items, generated_at)?;
    info!(bytes = page.len(), "Rendered page");
    Ok(page)
}

/// Write the rendered page, replacing whatever was at `path`.
#[instrument(level = "info", skip(page), fields(path = %path.display()))]
pub async fn write_page(path: &Path, page: &str) -> Result<()> {
    fs::write(path, page).await?;
    info!(bytes = page.len(), "Wrote HTML page");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    const TEMPLATE: &str = "<p>{{ generated_at }}</p>\
{% for item in news_items %}<li>{{ item.source }}|{{ item.title }}|{{ item.link }}|{{ item.display_time }}|{{ item.description }}</li>{% endfor %}";

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                "Lobsters",
                "Rust & friends",
                "https://l.test/1",
                "<p>hi</p>",
                Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap(),
            ),
            Record::new(
                "Hacker News",
                "Second",
                "http://a",
                "10 points, by u1",
                Utc.with_ymd_and_hms(2025, 5, 6, 11, 0, 0).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_render_passes_full_context() {
        let page = render("page.html", TEMPLATE, &records(), "2025-05-06 13:00:00 UTC").unwrap();

        assert!(page.starts_with("<p>2025-05-06 13:00:00 UTC</p>"));
        assert!(page.contains("<li>Lobsters|Rust & friends|"));
        assert!(page.contains("|2025-05-06 12:00:00 UTC|<p>hi</p></li>"));
        assert!(page.contains("<li>Hacker News|Second|"));
        assert!(page.find("Lobsters").unwrap() < page.find("Hacker News").unwrap());
    }

    #[test]
    fn test_render_html_template_leaves_markup_unescaped() {
        let news_items = [Record::new(
            "Lobsters",
            "Hello",
            "http://feeds.test/1",
            "<p>Hello  world</p>",
            Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap(),
        )];
        let page = render(
            "template.html",
            "{% for item in news_items %}{{ item.description }}{% endfor %}",
            &news_items,
            "x",
        )
        .unwrap();

        assert_eq!(page, "<p>Hello  world</p>");
    }

    #[test]
    fn test_render_non_html_template_is_not_escaped() {
        let page = render("page.txt", "{{ news_items[0].title }}", &records(), "x").unwrap();
        assert_eq!(page, "Rust & friends");
    }

    #[test]
    fn test_render_broken_template_is_error() {
        let err = render("page.html", "{% for %}", &records(), "x").unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_shipped_template_renders() {
        let source = include_str!("../../template.html");
        let page = render("template.html", source, &records(), "2025-05-06 13:00:00 UTC").unwrap();

        assert!(page.contains("Rust & friends"));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.contains("2025-05-06 13:00:00 UTC"));
    }

    #[tokio::test]
    async fn test_render_page_and_overwrite() {
        let dir = tempdir().unwrap();
        let template_path = dir.path().join("template.html");
        fs::write(&template_path, "{{ news_items|length }} items at {{ generated_at }}")
            .await
            .unwrap();
        let out = dir.path().join("index.html");
        fs::write(&out, "old content that is much longer than the new page")
            .await
            .unwrap();

        let page = render_page(&template_path, &records(), "now").await.unwrap();
        write_page(&out, &page).await.unwrap();

        assert_eq!(fs::read_to_string(&out).await.unwrap(), "2 items at now");
    }

    #[tokio::test]
    async fn test_missing_template_is_io_error() {
        let dir = tempdir().unwrap();
        let err = render_page(&dir.path().join("nope.html"), &records(), "now")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let err = write_page(&dir.path().join("missing/index.html"), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
