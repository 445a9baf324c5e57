//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading posts and projects. All of them abort the build.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to walk content directory `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("invalid frontmatter in `{path}`")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("`{path}` is missing required fields: {}", .fields.join(", "))]
    MissingFields {
        path: PathBuf,
        fields: Vec<&'static str>,
    },

    #[error("`{path}` has an invalid date `{raw}`")]
    InvalidDate { path: PathBuf, raw: String },

    #[error("file name of `{0}` does not produce a usable slug")]
    EmptySlug(PathBuf),

    #[error("`{first}` and `{second}` both map to the slug `{slug}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid projects file `{path}`")]
    Projects {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
