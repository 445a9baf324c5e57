//! Blog index: every post with category and tag filters.

use super::{Layout, Page, Site, cards};
use crate::{
    content::tag_slug,
    template::{self, Context},
};

pub const PATH: &str = "blog.html";

pub fn build(site: &Site) -> Page {
    let category_options: String = site
        .categories()
        .into_iter()
        .map(|(category, _)| cards::option(category, category))
        .collect();
    let tag_options: String = site
        .tags
        .keys()
        .map(|tag| cards::option(&tag_slug(tag), tag))
        .collect();

    let mut ctx = Context::default();
    ctx.insert("post_cards", cards::post_cards(site.posts, site.urls));
    ctx.insert("category_options", category_options);
    ctx.insert("tag_options", tag_options);
    ctx.insert("post_count", site.posts.len().to_string());

    let base = &site.config.base;
    site.render_page(
        template::BLOG,
        &ctx,
        Layout {
            path: PATH,
            title: format!("Blog | {}", base.title),
            description: base.description.clone(),
            og_type: "website",
            og_image: String::new(),
            page: "blog",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::content::fixtures::post;

    #[test]
    fn test_blog_lists_everything_with_filters() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![
            post("b", "2024-02-01", "Tech", &["Rust", "web"]),
            post("a", "2024-01-01", "Life", &["web"]),
        ];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());

        let page = build(&site);
        assert_eq!(page.html.matches("class=\"post-card\"").count(), 2);
        assert!(page.html.contains(
            r#"<select><option value="Life">Life</option><option value="Tech">Tech</option></select>"#
        ));
        assert!(page.html.contains(r#"<option value="rust">Rust</option><option value="web">web</option>"#));
        assert!(page.html.contains("<title>Blog | Notes</title>"));
    }
}
