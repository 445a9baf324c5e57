//! YAML metadata header parsing.
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-01-15
//! tags: [rust, web]
//! ---
//! Body starts here.
//! ```
//!
//! Values are looked up by key with aliases, so `readingTime`,
//! `reading_time` and `reading-time` all resolve to the same field.

use regex::Regex;
use serde::de::Error as _;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

static FRONTMATTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\n(?:(.*?)\n)?---[ \t]*(?:\n|\z)(.*)\z").unwrap()
});

// ============================================================================
// Field keys
// ============================================================================

pub const TITLE: &[&str] = &["title"];
pub const DATE: &[&str] = &["date"];
pub const CATEGORY: &[&str] = &["category"];
pub const SUMMARY: &[&str] = &["summary"];
pub const READING_TIME: &[&str] = &["readingTime", "reading_time", "reading-time"];
pub const TAGS: &[&str] = &["tags"];
pub const COVER: &[&str] = &["cover", "coverImage", "cover_image", "image"];

/// Parsed metadata header of a post.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    /// Split a document into its metadata header and body.
    ///
    /// Line endings are normalized and a UTF-8 BOM is dropped first. A
    /// document without a header yields an empty header and the whole text
    /// as body.
    pub fn parse(content: &str) -> Result<(Self, String), serde_yaml::Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let content = content.replace("\r\n", "\n");

        let Some(captures) = FRONTMATTER_REGEX.captures(&content) else {
            return Ok((Self::default(), content));
        };

        let yaml = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str()).to_owned();

        let fields = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Null => Mapping::new(),
            Value::Mapping(map) => map,
            _ => return Err(serde_yaml::Error::custom("metadata header must be a mapping")),
        };

        Ok((Self { fields }, body))
    }

    fn lookup(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|key| self.fields.get(*key))
    }

    /// Scalar value for the first present key, trimmed. Blank counts as absent.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).and_then(scalar)
    }

    /// Tags as a YAML list or a comma-separated string, trimmed and de-duplicated.
    pub fn tags(&self) -> Vec<String> {
        let raw: Vec<String> = match self.lookup(TAGS) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar).collect(),
            Some(Value::String(list)) => list.split(',').map(|t| t.trim().to_owned()).collect(),
            Some(other) => scalar(other).into_iter().collect(),
            None => Vec::new(),
        };

        let mut tags: Vec<String> = Vec::with_capacity(raw.len());
        for tag in raw {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Reading-time label. Bare numbers become `"N min read"`.
    pub fn reading_time(&self) -> Option<String> {
        let label = self.text(READING_TIME)?;
        if label.bytes().all(|b| b.is_ascii_digit()) {
            Some(format!("{label} min read"))
        } else {
            Some(label)
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
