//! Derived artifacts: search index, tag map, sitemap, robots file, RSS feed.
//!
//! Generators only produce content; the build pipeline writes it.

pub mod robots;
pub mod rss;
pub mod search;
pub mod sitemap;

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
