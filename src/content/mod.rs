//! Content loading: posts from Markdown files, projects from TOML.
//!
//! ```text
//! posts/**/*.md ─► Frontmatter::parse ─► validate ─► MarkdownRenderer ─► Post
//!                                                                     │
//!                                      sort (date desc, slug asc) ◄───┘
//! ```

mod error;
mod frontmatter;
mod loader;
mod post;
mod projects;
mod tags;

pub use error::ContentError;
pub use loader::load_posts;
pub use post::Post;
pub use projects::{Project, load_projects};
pub use tags::{TagMap, tag_map, tag_slug};

#[cfg(test)]
pub(crate) use post::fixtures;
