//! About page with site statistics.

use super::{Layout, Page, Site, escape_owned};
use crate::{
    template::{self, Context},
    utils::date::to_display,
};

pub const PATH: &str = "about.html";

pub fn build(site: &Site) -> Page {
    let categories = site.categories();
    let category_list: String = categories
        .iter()
        .map(|(category, count)| {
            format!(
                r#"<li>{} <span class="category-count">{count}</span></li>"#,
                escape_owned(category)
            )
        })
        .collect();
    let latest = site
        .posts
        .first()
        .map(|post| to_display(&post.date))
        .unwrap_or_default();

    let mut ctx = Context::default();
    ctx.insert("post_count", site.posts.len().to_string());
    ctx.insert("tag_count", site.tags.len().to_string());
    ctx.insert("category_count", categories.len().to_string());
    ctx.insert("category_list", category_list);
    ctx.insert("latest_post_date", latest);

    let base = &site.config.base;
    site.render_page(
        template::ABOUT,
        &ctx,
        Layout {
            path: PATH,
            title: format!("About | {}", base.title),
            description: base.description.clone(),
            og_type: "website",
            og_image: String::new(),
            page: "about",
        },
    )
}
