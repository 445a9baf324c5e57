//! Site-relative and absolute URL construction.
//!
//! Every link the generator emits goes through [`SiteUrls`], which pairs the
//! site origin with the base path the site is served under.
//!
//! | Input            | `path()` (base `/notes`) | `absolute()`                          |
//! |------------------|--------------------------|---------------------------------------|
//! | `""`             | `/notes/`                | `https://a.github.io/notes/`          |
//! | `posts/x.html`   | `/notes/posts/x.html`    | `https://a.github.io/notes/posts/x.html` |

use crate::config::ConfigError;
use url::Url;

/// Origin and base path of the deployed site.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    origin: Url,
    base_path: String,
}

impl SiteUrls {
    /// Build from an origin (`https://example.com`) and a base path (`/blog`).
    ///
    /// The origin must be an absolute http(s) url; any path it carries is
    /// ignored in favour of `base_path`.
    pub fn new(origin: &str, base_path: &str) -> Result<Self, ConfigError> {
        let origin = Url::parse(origin.trim())
            .map_err(|e| ConfigError::Validation(format!("invalid site url `{origin}`: {e}")))?;
        if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
            return Err(ConfigError::Validation(format!(
                "site url must be an absolute http(s) url, got `{origin}`"
            )));
        }

        Ok(Self {
            origin,
            base_path: normalize_base_path(base_path),
        })
    }

    /// Normalized base path: empty, or `/segment[/segment...]` without trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Origin without trailing slash, e.g. `https://example.com`.
    pub fn origin(&self) -> String {
        self.origin.origin().ascii_serialization()
    }

    /// Site-relative url for an output path.
    pub fn path(&self, rel: &str) -> String {
        format!("{}/{}", self.base_path, rel.trim_start_matches('/'))
    }

    /// Absolute url for an output path.
    pub fn absolute(&self, rel: &str) -> String {
        format!("{}{}", self.origin(), self.path(rel))
    }

    /// Resolve a user-supplied reference (cover image, project link).
    ///
    /// Absolute and protocol-relative urls are kept, everything else is
    /// treated as a path under the site root.
    pub fn resolve(&self, reference: &str) -> String {
        let reference = reference.trim();
        if reference.is_empty() || has_scheme(reference) || reference.starts_with("//") {
            reference.to_owned()
        } else {
            self.path(reference)
        }
    }

    /// Like [`SiteUrls::resolve`] but always absolute, for social previews.
    pub fn resolve_absolute(&self, reference: &str) -> String {
        let resolved = self.resolve(reference);
        if resolved.starts_with('/') && !resolved.starts_with("//") {
            format!("{}{}", self.origin(), resolved)
        } else {
            resolved
        }
    }

    /// Whether `href` points at an http(s) origin other than the site's.
    ///
    /// Relative paths, fragments and non-web schemes (`mailto:`, `tel:`)
    /// are never external.
    pub fn is_external(&self, href: &str) -> bool {
        let href = href.trim();
        let candidate = if href.starts_with("//") {
            self.origin.join(href).ok()
        } else if has_scheme(href) {
            Url::parse(href).ok()
        } else {
            None
        };

        candidate.is_some_and(|url| {
            matches!(url.scheme(), "http" | "https") && url.origin() != self.origin.origin()
        })
    }
}

/// Normalize a base path: `"blog/"` → `"/blog"`, `"/"` → `""`.
pub fn normalize_base_path(base_path: &str) -> String {
    let segments: Vec<_> = base_path
        .trim()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Check if a link has a scheme like `http:`, `mailto:`, etc.
#[inline]
pub fn has_scheme(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
