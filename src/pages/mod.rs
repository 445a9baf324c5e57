//! Page builders.
//!
//! Every page renders its inner template first, then wraps the result in
//! `base.html`:
//!
//! | Page     | Output path            | Inner template  |
//! |----------|------------------------|-----------------|
//! | home     | `index.html`           | `home.html`     |
//! | blog     | `blog.html`            | `blog.html`     |
//! | projects | `projects.html`        | `projects.html` |
//! | about    | `about.html`           | `about.html`    |
//! | post     | `posts/<slug>.html`    | `post.html`     |
//! | tag      | `tags/<tag-slug>.html` | `tag.html`      |

mod about;
mod blog;
mod cards;
mod home;
mod post;
mod projects;
mod related;
mod tag;

use crate::{
    config::SiteConfig,
    content::{Post, Project, TagMap, tag_map},
    template::{self, Context, Templates},
    utils::{html::escape, url::SiteUrls},
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

// ============================================================================
// Types
// ============================================================================

/// A fully rendered page, not yet minified or written.
#[derive(Debug, Clone)]
pub struct Page {
    /// Output-relative path, e.g. `posts/hello.html`.
    pub path: String,
    pub html: String,
    /// Sitemap `<lastmod>`.
    pub lastmod: DateTime<Utc>,
}

/// Everything page builders read. Borrowed for the duration of a build.
pub struct Site<'a> {
    pub config: &'a SiteConfig,
    pub urls: &'a SiteUrls,
    pub templates: &'a Templates,
    /// Newest first.
    pub posts: &'a [Post],
    pub projects: &'a [Project],
    pub tags: TagMap<'a>,
    pub build_time: DateTime<Utc>,
}

/// Per-page values of the shared layout.
struct Layout<'p> {
    /// Output-relative path, used for the canonical url.
    path: &'p str,
    title: String,
    description: String,
    og_type: &'static str,
    og_image: String,
    /// Page identifier for navigation highlighting.
    page: &'static str,
}

impl<'a> Site<'a> {
    pub fn new(
        config: &'a SiteConfig,
        urls: &'a SiteUrls,
        templates: &'a Templates,
        posts: &'a [Post],
        projects: &'a [Project],
        build_time: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            urls,
            templates,
            posts,
            projects,
            tags: tag_map(posts),
            build_time,
        }
    }

    /// Render every page in sitemap order: listing pages, posts, tags.
    pub fn build_pages(&self) -> Vec<Page> {
        let mut pages = vec![
            home::build(self),
            blog::build(self),
            projects::build(self),
            about::build(self),
        ];
        pages.extend(post::build_all(self));
        pages.extend(tag::build_all(self));
        pages
    }

    /// Tags with their post counts, most used first, ties alphabetical.
    pub fn tags_by_count(&self) -> Vec<(&'a str, usize)> {
        let mut counts: Vec<_> = self
            .tags
            .iter()
            .map(|(tag, posts)| (*tag, posts.len()))
            .collect();
        counts.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
        counts
    }

    /// Distinct categories, sorted, with post counts.
    pub fn categories(&self) -> Vec<(&'a str, usize)> {
        let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
        for post in self.posts {
            *counts.entry(post.category.as_str()).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Render an inner template and wrap it in the base layout.
    fn render_page(&self, template_name: &str, ctx: &Context, layout: Layout<'_>) -> Page {
        let content = template::render(self.templates.get(template_name), ctx);
        let layout_ctx = self.layout_context(&layout, content);

        Page {
            path: layout.path.to_owned(),
            html: template::render(self.templates.get(template::BASE), &layout_ctx),
            lastmod: self.build_time,
        }
    }

    fn layout_context(&self, layout: &Layout<'_>, content: String) -> Context {
        let base = &self.config.base;
        let build = &self.config.build;
        let canonical = canonical_url(self.urls, layout.path);
        let rss_url = if build.rss.enable {
            self.urls.path(&build.rss.path.to_string_lossy())
        } else {
            String::new()
        };

        let mut ctx = Context::default();
        ctx.insert("title", escape_owned(&layout.title));
        ctx.insert("description", escape_owned(&layout.description));
        ctx.insert("canonical", escape_owned(&canonical));
        ctx.insert("og_type", layout.og_type.to_owned());
        ctx.insert("og_image", escape_owned(&layout.og_image));
        ctx.insert("site_name", escape_owned(&base.title));
        ctx.insert("site_description", escape_owned(&base.description));
        ctx.insert("author", escape_owned(&base.author));
        ctx.insert("language", escape_owned(&base.language));
        ctx.insert("copyright", escape_owned(&base.copyright));
        ctx.insert("base_path", self.urls.base_path().to_owned());
        ctx.insert("rss_url", escape_owned(&rss_url));
        ctx.insert("search_index_url", self.urls.path(SEARCH_INDEX_PATH));
        ctx.insert("tags_url", self.urls.path(TAGS_JSON_PATH));
        ctx.insert("page", layout.page.to_owned());
        ctx.insert("year", self.build_time.year().to_string());
        ctx.insert("content", content);
        ctx
    }
}

/// Absolute url of an output page. The home page maps to the site root.
pub fn canonical_url(urls: &SiteUrls, path: &str) -> String {
    if path == home::PATH {
        urls.absolute("")
    } else {
        urls.absolute(path)
    }
}

/// Search index location, relative to the output directory.
pub const SEARCH_INDEX_PATH: &str = "search-index.json";
/// Tag map location, relative to the output directory.
pub const TAGS_JSON_PATH: &str = "tags.json";

fn escape_owned(s: &str) -> String {
    escape(s).into_owned()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::content::fixtures::post;

    #[test]
    fn test_build_pages_order_and_paths() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![
            post("second", "2024-02-01", "Tech", &["rust"]),
            post("first", "2024-01-01", "Life", &["rust", "Cooking"]),
        ];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());

        let paths: Vec<_> = site.build_pages().into_iter().map(|p| p.path).collect();
        assert_eq!(
            paths,
            vec![
                "index.html",
                "blog.html",
                "projects.html",
                "about.html",
                "posts/second.html",
                "posts/first.html",
                "tags/cooking.html",
                "tags/rust.html",
            ]
        );
    }

    #[test]
    fn test_layout_shared_values() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![post("a", "2024-02-01", "Tech", &["rust"])];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());

        let home = &site.build_pages()[0];
        assert!(home.html.contains("<title>Notes</title>"));
        assert!(home.html.contains(r#"href="https://alice.github.io/notes/""#));
        assert!(home.html.contains(r#"data-page="home""#));
        assert!(home.html.contains(r#"data-search="/notes/search-index.json""#));
        assert!(home.html.contains(r#"data-tags="/notes/tags.json""#));
        assert!(home.html.contains(r#"data-rss="/notes/rss.xml""#));
        assert!(home.html.contains("<footer>2024 Notes </footer>"));
        assert_eq!(home.lastmod, build_time());
    }

    #[test]
    fn test_tags_by_count() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![
            post("a", "2024-03-01", "Tech", &["web", "rust"]),
            post("b", "2024-02-01", "Tech", &["rust", "cli"]),
            post("c", "2024-01-01", "Tech", &["web"]),
        ];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());

        assert_eq!(site.tags_by_count(), vec![("rust", 2), ("web", 2), ("cli", 1)]);
        assert_eq!(site.categories(), vec![("Tech", 3)]);
    }
}
