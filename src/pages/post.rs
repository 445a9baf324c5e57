//! Individual post pages.

use super::{
    Layout, Page, Site, cards, escape_owned,
    related::{RELATED_LIMIT, related_posts},
};
use crate::{
    content::Post,
    template::{self, Context},
    utils::date::{to_display, to_iso},
};

/// One page per post, in post order.
pub fn build_all<'s>(site: &'s Site) -> impl Iterator<Item = Page> + 's {
    site.posts
        .iter()
        .enumerate()
        .map(move |(index, post)| build(site, index, post))
}

/// Render the post at `index` of the newest-first post list.
fn build(site: &Site, index: usize, post: &Post) -> Page {
    let urls = site.urls;
    let related: String = related_posts(post, site.posts, RELATED_LIMIT)
        .into_iter()
        .map(|other| cards::related_item(other, urls))
        .collect();
    // Posts are newest first: the previous (older) post follows this one.
    let older = site.posts.get(index + 1);
    let newer = index.checked_sub(1).and_then(|i| site.posts.get(i));

    let mut ctx = Context::default();
    ctx.insert("post_title", escape_owned(&post.title));
    ctx.insert("post_date", to_display(&post.date));
    ctx.insert("post_date_iso", to_iso(&post.date));
    ctx.insert("post_category", escape_owned(&post.category));
    ctx.insert("reading_time", escape_owned(&post.reading_time));
    ctx.insert("word_count", post.word_count().to_string());
    ctx.insert("post_tags", cards::tag_list(&post.tags, urls));
    ctx.insert("cover", escape_owned(&urls.resolve(&post.cover)));
    ctx.insert("post_content", post.html.clone());
    ctx.insert("related_posts", related);
    ctx.insert("prev_post", nav_link(site, older, "prev", "Older"));
    ctx.insert("next_post", nav_link(site, newer, "next", "Newer"));

    let path = post.output_path();
    let mut page = site.render_page(
        template::POST,
        &ctx,
        Layout {
            path: &path,
            title: format!("{} | {}", post.title, site.config.base.title),
            description: post.summary.clone(),
            og_type: "article",
            og_image: urls.resolve_absolute(&post.cover),
            page: "post",
        },
    );
    page.lastmod = post.date;
    page
}

fn nav_link(site: &Site, target: Option<&Post>, rel: &str, label: &str) -> String {
    target
        .map(|post| {
            format!(
                r#"<a class="post-nav-{rel}" href="{}" rel="{rel}"><span class="post-nav-label">{label}</span> {}</a>"#,
                escape_owned(&site.urls.path(&post.output_path())),
                escape_owned(&post.title),
            )
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::content::fixtures::post;

    fn pages(posts: &[Post]) -> Vec<Page> {
        let config = config();
        let urls = urls();
        let templates = templates();
        let site = Site::new(&config, &urls, &templates, posts, &[], build_time());
        build_all(&site).collect()
    }

    #[test]
    fn test_post_page_content() {
        let posts = vec![post("hello", "2024-01-15T08:30:00Z", "Tech", &["rust"])];
        let pages = pages(&posts);
        let page = &pages[0];

        assert_eq!(page.path, "posts/hello.html");
        assert_eq!(page.lastmod, posts[0].date);
        assert!(page.html.contains("<h1>Title hello</h1>"));
        assert!(page.html.contains(r#"<time datetime="2024-01-15T08:30:00Z">January 15, 2024</time>"#));
        assert!(page.html.contains("<p>Body of hello</p>"));
        assert!(page.html.contains(r#"<img src="/notes/images/hello.png">"#));
        assert!(page.html.contains(r#"content="article""#));
        assert!(page.html.contains(r#"content="https://alice.github.io/notes/images/hello.png""#));
        assert!(page.html.contains(r#"href="https://alice.github.io/notes/posts/hello.html""#));
        assert!(page.html.contains("<title>Title hello | Notes</title>"));
        assert!(page.html.contains("<span>3 words</span>"));
    }

    #[test]
    fn test_prev_next_navigation() {
        let posts = vec![
            post("new", "2024-03-01", "Tech", &["rust"]),
            post("mid", "2024-02-01", "Tech", &["rust"]),
            post("old", "2024-01-01", "Tech", &["rust"]),
        ];
        let pages = pages(&posts);

        assert!(pages[0].html.contains(r#"<nav><a class="post-nav-prev" href="/notes/posts/mid.html""#));
        assert!(!pages[0].html.contains("post-nav-next"));

        assert!(pages[1].html.contains(r#"href="/notes/posts/old.html" rel="prev""#));
        assert!(pages[1].html.contains(r#"href="/notes/posts/new.html" rel="next""#));

        assert!(!pages[2].html.contains("post-nav-prev"));
        assert!(pages[2].html.contains(r#"href="/notes/posts/mid.html" rel="next""#));
    }

    #[test]
    fn test_related_posts_rendered() {
        let posts = vec![
            post("a", "2024-03-01", "Tech", &["rust"]),
            post("b", "2024-02-01", "Tech", &["rust"]),
        ];
        let pages = pages(&posts);
        assert!(pages[0].html.contains(r#"<li class="related-post"><a href="/notes/posts/b.html">"#));
    }
}
