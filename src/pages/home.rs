//! Home page: recent posts and popular tags.

use super::{Layout, Page, Site, cards};
use crate::template::{self, Context};

pub const PATH: &str = "index.html";

/// Number of tags in the popular-tags cloud.
const POPULAR_TAGS: usize = 12;

pub fn build(site: &Site) -> Page {
    let recent = site.posts.iter().take(site.config.build.recent_posts);
    let popular: String = site
        .tags_by_count()
        .into_iter()
        .take(POPULAR_TAGS)
        .map(|(tag, count)| cards::tag_link_with_count(tag, count, site.urls))
        .collect();

    let mut ctx = Context::default();
    ctx.insert("recent_posts", cards::post_cards(recent, site.urls));
    ctx.insert("popular_tags", popular);
    ctx.insert("post_count", site.posts.len().to_string());
    ctx.insert("tag_count", site.tags.len().to_string());

    let base = &site.config.base;
    site.render_page(
        template::HOME,
        &ctx,
        Layout {
            path: PATH,
            title: base.title.clone(),
            description: base.description.clone(),
            og_type: "website",
            og_image: String::new(),
            page: "home",
        },
    )
}
