//! Tag pages, one per tag slug.

use super::{Layout, Page, Site, cards};
use crate::{
    content::{Post, tag_slug},
    template::{self, Context},
};
use std::collections::BTreeMap;

/// Tags sharing a slug (`C++` and `c`) are merged onto one page named
/// after the first tag in sort order.
struct TagPage<'a> {
    name: &'a str,
    posts: Vec<&'a Post>,
}

/// One page per distinct tag slug, in slug order.
pub fn build_all<'s>(site: &'s Site) -> impl Iterator<Item = Page> + 's {
    let mut by_slug: BTreeMap<String, TagPage<'s>> = BTreeMap::new();
    for (tag, posts) in &site.tags {
        let entry = by_slug.entry(tag_slug(tag)).or_insert_with(|| TagPage {
            name: tag,
            posts: Vec::new(),
        });
        entry.posts.extend(posts.iter().copied());
    }

    by_slug.into_iter().map(move |(slug, mut tag_page)| {
        // Merged lists must keep the global post order without repeats.
        tag_page
            .posts
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        tag_page.posts.dedup_by(|a, b| a.slug == b.slug);
        build(site, &slug, &tag_page)
    })
}

fn build(site: &Site, slug: &str, tag_page: &TagPage) -> Page {
    let mut ctx = Context::default();
    ctx.insert("tag_name", super::escape_owned(tag_page.name));
    ctx.insert("tag_count", tag_page.posts.len().to_string());
    ctx.insert(
        "post_cards",
        cards::post_cards(tag_page.posts.iter().copied(), site.urls),
    );

    let path = format!("tags/{slug}.html");
    site.render_page(
        template::TAG,
        &ctx,
        Layout {
            path: &path,
            title: format!("#{} | {}", tag_page.name, site.config.base.title),
            description: format!("Posts tagged {}", tag_page.name),
            og_type: "website",
            og_image: String::new(),
            page: "tag",
        },
    )
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::content::fixtures::post;

    #[test]
    fn test_tag_pages() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![
            post("b", "2024-02-01", "Tech", &["Web Dev", "rust"]),
            post("a", "2024-01-01", "Tech", &["rust"]),
        ];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());
        let pages: Vec<_> = build_all(&site).collect();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].path, "tags/rust.html");
        assert!(pages[0].html.contains("<h1>rust</h1><p>2</p>"));
        let b = pages[0].html.find("posts/b.html").unwrap();
        let a = pages[0].html.find("posts/a.html").unwrap();
        assert!(b < a);

        assert_eq!(pages[1].path, "tags/web-dev.html");
        assert!(pages[1].html.contains("<h1>Web Dev</h1><p>1</p>"));
    }

    #[test]
    fn test_colliding_slugs_merge() {
        let config = config();
        let urls = urls();
        let templates = templates();
        let posts = vec![
            post("b", "2024-02-01", "Tech", &["C++", "c"]),
            post("a", "2024-01-01", "Tech", &["c"]),
        ];
        let site = Site::new(&config, &urls, &templates, &posts, &[], build_time());
        let pages: Vec<_> = build_all(&site).collect();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].path, "tags/c.html");
        assert!(pages[0].html.contains("<h1>C++</h1><p>2</p>"));
    }
}
