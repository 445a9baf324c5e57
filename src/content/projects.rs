//! Optional `projects.toml` data file.
//!
//! ```toml
//! [[project]]
//! name = "folio"
//! description = "Static site generator"
//! url = "https://example.com/folio"
//! repository = "https://github.com/alice/folio"
//! tags = ["rust", "cli"]
//! ```

use super::ContentError;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path};

/// A showcased project.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectsFile {
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
}

/// Load projects in file order. A missing file yields an empty list.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, ContentError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(ContentError::Io(path.to_path_buf(), err)),
    };

    let file: ProjectsFile = toml::from_str(&content).map_err(|source| ContentError::Projects {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(file.projects)
}
