//! Normalized post record.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A loaded, validated and rendered post.
///
/// Immutable once the loader returns it.
#[derive(Debug, Clone)]
pub struct Post {
    /// URL-safe identifier derived from the file stem.
    pub slug: String,
    pub title: String,
    /// Publish time, UTC.
    pub date: DateTime<Utc>,
    pub category: String,
    /// Single-line summary (whitespace collapsed).
    pub summary: String,
    /// Reading-time label, e.g. `5 min read`.
    pub reading_time: String,
    /// Non-empty, de-duplicated, in source order.
    pub tags: Vec<String>,
    /// Cover image reference as written in the header.
    pub cover: String,
    /// Rendered body HTML.
    pub html: String,
    /// Plain text of the body.
    pub text: String,
    /// Source file the post was loaded from.
    pub source: PathBuf,
}

impl Post {
    /// Output path relative to the output directory.
    pub fn output_path(&self) -> String {
        format!("posts/{}.html", self.slug)
    }

    /// Words in the plain-text body.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
