//! Sitemap generation.
//!
//! Lists every generated page for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::escape_xml;
use crate::{
    pages::{Page, canonical_url},
    utils::{date::to_iso, url::SiteUrls},
};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// Sitemap data structure. Entries keep insertion order, one per path.
#[derive(Debug, Default)]
pub struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
    /// Output paths already listed
    seen: FxHashSet<String>,
}

/// Single URL entry in the sitemap
#[derive(Debug)]
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification time, RFC 3339
    lastmod: String,
}

impl Sitemap {
    /// Build sitemap from rendered pages, in page order.
    pub fn from_pages(pages: &[Page], urls: &SiteUrls) -> Self {
        let mut sitemap = Self::default();
        for page in pages {
            sitemap.push(urls, &page.path, page.lastmod);
        }
        sitemap
    }

    /// Add a page. Paths already present are ignored.
    pub fn push(&mut self, urls: &SiteUrls, path: &str, lastmod: DateTime<Utc>) {
        if !self.seen.insert(path.to_owned()) {
            return;
        }
        self.urls.push(UrlEntry {
            loc: canonical_url(urls, path),
            lastmod: to_iso(&lastmod),
        });
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Generate sitemap XML string.
    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(128 + self.urls.len() * 128);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

// ============================================================================
// Tests
// ============================================================================
