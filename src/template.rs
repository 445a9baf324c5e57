//! Placeholder templates.
//!
//! Templates are plain HTML with `{{ name }}` placeholders. There are no
//! conditionals or loops: callers pre-render repeated fragments and pass
//! them in as values. Substituted values are never re-scanned.

use crate::log;
use rayon::prelude::*;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// Template variables by placeholder name.
pub type Context = FxHashMap<&'static str, String>;

// ============================================================================
// Template names
// ============================================================================

pub const BASE: &str = "base.html";
pub const HOME: &str = "home.html";
pub const BLOG: &str = "blog.html";
pub const POST: &str = "post.html";
pub const PROJECTS: &str = "projects.html";
pub const ABOUT: &str = "about.html";
pub const TAG: &str = "tag.html";

/// Every template a build needs.
pub const TEMPLATE_NAMES: [&str; 7] = [BASE, HOME, BLOG, POST, PROJECTS, ABOUT, TAG];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template `{name}` could not be read from `{path}`")]
    Missing {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Rendering
// ============================================================================

/// Replace every placeholder with its context value, or nothing when absent.
pub fn render(template: &str, ctx: &Context) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            ctx.get(&caps[1]).map(String::as_str).unwrap_or_default().to_owned()
        })
        .into_owned()
}

// ============================================================================
// Loading
// ============================================================================

/// The named template set, read once per build.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    sources: FxHashMap<&'static str, String>,
}

impl Templates {
    /// Read all templates from `dir` in parallel.
    ///
    /// Fails with the first missing template in [`TEMPLATE_NAMES`] order.
    pub fn load(dir: &Path) -> Result<Self, TemplateError> {
        let results: Vec<_> = TEMPLATE_NAMES
            .par_iter()
            .map(|&name| {
                let path = dir.join(name);
                fs::read_to_string(&path)
                    .map(|source| (name, source))
                    .map_err(|source| TemplateError::Missing { name, path, source })
            })
            .collect();

        let sources = results.into_iter().collect::<Result<FxHashMap<_, _>, _>>()?;
        log!("templates"; "loaded {} templates from {}", sources.len(), dir.display());
        Ok(Self { sources })
    }

    /// Source of a named template.
    pub fn get(&self, name: &str) -> &str {
        self.sources.get(name).map_or("", String::as_str)
    }

    #[cfg(test)]
    pub fn from_sources(sources: &[(&'static str, &str)]) -> Self {
        Self {
            sources: sources
                .iter()
                .map(|(name, source)| (*name, (*source).to_owned()))
                .collect(),
        }
    }
}
