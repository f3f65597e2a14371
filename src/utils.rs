//! Utility functions for HTML cleanup and logging.
//!
//! - Image stripping for feed summaries
//! - String truncation so raw response bodies stay readable in logs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Remove every `<img>` element from an HTML fragment.
///
/// The fragment is parsed with `scraper`, each image node is detached from
/// the tree together with its subtree, and the rest of the markup is
/// serialized back out. Surrounding markup and text are left untouched, and
/// a fragment that is a single element comes back as just that element.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     strip_images(r#"<p>Hello <img src="x.png"/> world</p>"#),
///     "<p>Hello  world</p>"
/// );
/// ```
pub fn strip_images(fragment: &str) -> String {
    let mut html = Html::parse_fragment(fragment);

    let images: Vec<_> = html.select(&IMG_SELECTOR).map(|img| img.id()).collect();
    for id in images {
        if let Some(mut node) = html.tree.get_mut(id) {
            node.detach();
        }
    }

    // Fragment nodes sit directly under the parser's `<html>` root and any
    // `<body>` tag in the input is dropped, so the root's inner markup is
    // already the unwrapped fragment.
    html.root_element().inner_html()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes (backing off to a char boundary) with
/// an ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
