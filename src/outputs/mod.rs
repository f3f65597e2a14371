//! Output generation.
//!
//! # Submodules
//!
//! - [`html`]: Renders the sorted records through the page template and
//!   writes the result to disk
//!
//! # Template context
//!
//! ```text
//! news_items    sequence of records: source, title, link, description,
//!               display_time, time_posted
//! generated_at  "YYYY-MM-DD HH:MM:SS UTC"
//! ```

pub mod html;
