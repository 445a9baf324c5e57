//! Projects showcase.

use super::{Layout, Page, Site, cards};
use crate::template::{self, Context};

pub const PATH: &str = "projects.html";

pub fn build(site: &Site) -> Page {
    let project_cards: String = site
        .projects
        .iter()
        .map(|project| cards::project_card(project, site.urls))
        .collect();

    let mut ctx = Context::default();
    ctx.insert("project_cards", project_cards);
    ctx.insert("project_count", site.projects.len().to_string());

    let base = &site.config.base;
    site.render_page(
        template::PROJECTS,
        &ctx,
        Layout {
            path: PATH,
            title: format!("Projects | {}", base.title),
            description: format!("Projects by {}", base.author),
            og_type: "website",
            og_image: String::new(),
            page: "projects",
        },
    )
}
