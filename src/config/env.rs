//! Environment variable overrides.
//!
//! | Variable            | Effect                                             |
//! |---------------------|----------------------------------------------------|
//! | `SITE_URL`          | site origin                                        |
//! | `BASE_PATH`         | url path prefix                                    |
//! | `SITE_NAME`         | `[base].title`                                     |
//! | `SITE_DESCRIPTION`  | `[base].description`                               |
//! | `GITHUB_REPOSITORY` | `owner/repo`, derives a GitHub Pages origin + path |
//! | `SOURCE_DATE_EPOCH` | frozen build timestamp (unix seconds)              |
//!
//! Empty values count as unset.

use super::ConfigError;
use chrono::{DateTime, Utc};

/// Values read from the process environment, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub url: Option<String>,
    pub base_path: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub build_time: Option<DateTime<Utc>>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let (pages_url, pages_base) = get("GITHUB_REPOSITORY")
            .and_then(|repo| github_pages(&repo))
            .unzip();

        let build_time = get("SOURCE_DATE_EPOCH")
            .map(|raw| {
                raw.parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .ok_or_else(|| {
                        ConfigError::Validation(format!("SOURCE_DATE_EPOCH is not a timestamp: `{raw}`"))
                    })
            })
            .transpose()?;

        Ok(Self {
            url: get("SITE_URL").or(pages_url),
            base_path: get("BASE_PATH").or(pages_base),
            title: get("SITE_NAME"),
            description: get("SITE_DESCRIPTION"),
            build_time,
        })
    }
}

/// Derive the GitHub Pages origin and base path from `owner/repo`.
///
/// `alice/notes` → (`https://alice.github.io`, `/notes`);
/// `alice/alice.github.io` is a user site served from the root.
fn github_pages(repository: &str) -> Option<(String, String)> {
    let (owner, repo) = repository.split_once('/')?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    let owner = owner.to_ascii_lowercase();
    let host = format!("{owner}.github.io");
    let base_path = if repo.eq_ignore_ascii_case(&host) {
        String::new()
    } else {
        format!("/{repo}")
    };

    Some((format!("https://{host}"), base_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Result<EnvOverrides, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        EnvOverrides::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let env = lookup(&[]).unwrap();
        assert!(env.url.is_none());
        assert!(env.base_path.is_none());
        assert!(env.build_time.is_none());
    }

    #[test]
    fn test_github_project_site() {
        let env = lookup(&[("GITHUB_REPOSITORY", "Alice/notes")]).unwrap();
        assert_eq!(env.url.as_deref(), Some("https://alice.github.io"));
        assert_eq!(env.base_path.as_deref(), Some("/notes"));
    }

    #[test]
    fn test_github_user_site() {
        let env = lookup(&[("GITHUB_REPOSITORY", "alice/alice.github.io")]).unwrap();
        assert_eq!(env.url.as_deref(), Some("https://alice.github.io"));
        assert_eq!(env.base_path.as_deref(), Some(""));
    }

    #[test]
    fn test_explicit_values_win_over_repository() {
        let env = lookup(&[
            ("GITHUB_REPOSITORY", "alice/notes"),
            ("SITE_URL", "https://notes.example.org"),
            ("BASE_PATH", "/"),
        ])
        .unwrap();
        assert_eq!(env.url.as_deref(), Some("https://notes.example.org"));
        assert_eq!(env.base_path.as_deref(), Some("/"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let env = lookup(&[("SITE_URL", "  "), ("SITE_NAME", "")]).unwrap();
        assert!(env.url.is_none());
        assert!(env.title.is_none());
    }

    #[test]
    fn test_source_date_epoch() {
        let env = lookup(&[("SOURCE_DATE_EPOCH", "1704067200")]).unwrap();
        assert_eq!(
            env.build_time.map(|t| t.to_rfc3339()),
            Some("2024-01-01T00:00:00+00:00".to_string())
        );

        assert!(lookup(&[("SOURCE_DATE_EPOCH", "yesterday")]).is_err());
    }

    #[test]
    fn test_malformed_repository() {
        assert!(github_pages("no-slash").is_none());
        assert!(github_pages("/repo").is_none());
        assert!(github_pages("owner/").is_none());
    }
}
