//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── Templates::load()        (parallel reads)
//!     ├── load_posts()             Markdown → Post, sorted newest first
//!     ├── load_projects()
//!     │
//!     ├── Site::build_pages()      every page rendered in memory
//!     ├── search / tags / sitemap / rss / robots
//!     │
//!     └── OutputWriter             clean, then write everything
//! ```
//!
//! Nothing touches the output directory until every page and artifact has
//! rendered, so a failed build leaves the previous output intact.

use crate::{
    config::SiteConfig,
    content::{load_posts, load_projects},
    generator::{
        robots::robots_txt,
        rss::build_feed,
        search::{search_index, tag_index},
        sitemap::Sitemap,
    },
    log,
    markdown::MarkdownRenderer,
    output::OutputWriter,
    pages::{SEARCH_INDEX_PATH, Site, TAGS_JSON_PATH},
    template::Templates,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Robots file location, relative to the output directory.
const ROBOTS_PATH: &str = "robots.txt";

/// Ads policy location, relative to the output directory.
const ADS_PATH: &str = "ads.txt";

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub posts: usize,
    pub pages: usize,
    /// Every file written, assets included.
    pub files: usize,
    pub output: PathBuf,
}

/// Build the entire site. `build_time` stamps non-post sitemap entries and
/// the feed, so a fixed value makes the output reproducible.
pub fn build_site(config: &SiteConfig, build_time: DateTime<Utc>) -> Result<BuildSummary> {
    config.validate()?;
    let urls = config.urls()?;
    let templates = Templates::load(&config.build.templates)?;

    let renderer = MarkdownRenderer::new(&urls);
    let posts = load_posts(&config.build.content, &renderer)
        .with_context(|| format!("Failed to load posts from {}", config.build.content.display()))?;
    let projects = load_projects(&config.build.projects)?;

    // ========================================================================
    // Render everything in memory
    // ========================================================================

    let site = Site::new(config, &urls, &templates, &posts, &projects, build_time);
    let pages = site.build_pages();

    let search = search_index(&posts, &urls);
    let tags = tag_index(&site.tags, &urls);

    let sitemap_path = config
        .build
        .sitemap
        .enable
        .then(|| config.build.sitemap.path.to_string_lossy().into_owned());
    let sitemap = sitemap_path
        .as_ref()
        .map(|_| Sitemap::from_pages(&pages, &urls));
    let feed = if config.build.rss.enable {
        Some(build_feed(config, &urls, &posts, build_time)?)
    } else {
        None
    };
    let robots = robots_txt(&urls, sitemap_path.as_deref());

    // ========================================================================
    // Write output
    // ========================================================================

    let mut writer = OutputWriter::new(config);
    writer.clean()?;

    for page in &pages {
        writer.write_html(&page.path, &page.html)?;
    }
    writer.write_json(SEARCH_INDEX_PATH, &search)?;
    writer.write_json(TAGS_JSON_PATH, &tags)?;

    if let (Some(path), Some(sitemap)) = (&sitemap_path, sitemap) {
        let count = sitemap.len();
        writer.write_xml(path, &sitemap.into_xml())?;
        log!("sitemap"; "{} ({} urls)", path, count);
    }
    if let Some(feed) = feed {
        writer.write_xml(&config.build.rss.path, &feed)?;
        log!("rss"; "{}", config.build.rss.path.display());
    }
    writer.write_text(ROBOTS_PATH, &robots)?;

    writer.copy_assets(&config.build.assets)?;
    if writer.copy_optional(&config.build.ads, ADS_PATH)? {
        log!("assets"; "{}", ADS_PATH);
    }

    let output = config.build.output.clone();
    log!("build"; "wrote {} files to {}", writer.written(), output.display());

    Ok(BuildSummary {
        posts: posts.len(),
        pages: pages.len(),
        files: writer.written(),
        output,
    })
}
