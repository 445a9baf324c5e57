//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[base]`    | Site metadata (title, author, url)           |
//! | `[build]`   | Build paths, base path, rss, sitemap         |
//! | `[serve]`   | Development server (port, interface)         |
//!
//! # Layers
//!
//! Defaults → `folio.toml` (optional) → environment ([`EnvOverrides`]) → CLI flags.
//! The result is built once in `main` and passed by reference everywhere.
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//!
//! [build]
//! content = "posts"
//! output = "dist"
//! minify = true
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod env;
mod error;
mod serve;

pub use env::EnvOverrides;
pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use crate::utils::url::SiteUrls;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading, may not exist)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Resolve the full configuration for a CLI invocation.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load(cli: &Cli, env: &EnvOverrides) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env(env);
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Url builder for this site.
    pub fn urls(&self) -> Result<SiteUrls, ConfigError> {
        SiteUrls::new(&self.base.url, &self.build.base_path)
    }

    /// Apply environment overrides on top of file values.
    pub fn apply_env(&mut self, env: &EnvOverrides) {
        Self::update_option(&mut self.base.url, env.url.as_ref());
        Self::update_option(&mut self.build.base_path, env.base_path.as_ref());
        Self::update_option(&mut self.base.title, env.title.as_ref());
        Self::update_option(&mut self.base.description, env.description.as_ref());
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(&root, cli);

        let args = cli.build_args();
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
        Self::update_option(&mut self.build.sitemap.enable, args.sitemap.as_ref());

        if let Commands::Serve {
            interface, port, ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            // Local preview: links must resolve against the dev server itself
            self.base.url = format!("http://{}:{}", self.serve.interface, self.serve.port);
            self.build.base_path = String::new();
        }

        Self::update_option(&mut self.base.url, args.base_url.as_ref());
        Self::update_option(&mut self.build.base_path, args.base_path.as_ref());
    }

    /// Point absolute urls at the address the dev server actually bound,
    /// unless an origin was given explicitly with `--base-url`.
    pub fn use_serve_addr(&mut self, cli: &Cli, addr: SocketAddr) {
        if cli.build_args().base_url.is_none() {
            self.base.url = format!("http://{addr}");
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.templates, cli.templates.as_ref());
        Self::update_option(&mut self.build.assets, cli.assets.as_ref());

        let root = Self::normalize_path(&expand_tilde(root));
        self.build.root = Some(root.clone());
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        for path in [
            &mut self.build.content,
            &mut self.build.output,
            &mut self.build.templates,
            &mut self.build.assets,
            &mut self.build.projects,
            &mut self.build.ads,
        ] {
            *path = Self::normalize_path(&root.join(expand_tilde(path)));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate the resolved configuration before building.
    pub fn validate(&self) -> Result<()> {
        self.urls()?;

        if !self.build.content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "content directory not found: {}",
                self.build.content.display()
            )));
        }
        if !self.build.templates.is_dir() {
            bail!(ConfigError::Validation(format!(
                "templates directory not found: {}",
                self.build.templates.display()
            )));
        }
        self.validate_output()?;

        Ok(())
    }

    /// The output directory is wiped on every build, so it must not hold any
    /// source directory, nor live inside one.
    fn validate_output(&self) -> Result<()> {
        let output = &self.build.output;
        if self.get_root().starts_with(output) {
            bail!(ConfigError::Validation(format!(
                "output directory must not be or contain the project root: {}",
                output.display()
            )));
        }

        for (name, dir) in [
            ("content", &self.build.content),
            ("templates", &self.build.templates),
            ("assets", &self.build.assets),
        ] {
            if output.starts_with(dir) || dir.starts_with(output) {
                bail!(ConfigError::Validation(format!(
                    "output directory {} overlaps the {name} directory {}",
                    output.display(),
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

/// Expand a leading `~` in a path.
fn expand_tilde(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
