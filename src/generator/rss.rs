//! RSS feed generation.
//!
//! The newest posts become feed items; the channel is validated before it
//! is serialized.

use crate::{
    config::SiteConfig,
    content::Post,
    utils::{date::to_rfc2822, url::SiteUrls},
};
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

/// Generator name advertised in the channel.
const GENERATOR: &str = concat!("folio ", env!("CARGO_PKG_VERSION"));

/// Build the feed XML for the most recent posts.
pub fn build_feed(
    config: &SiteConfig,
    urls: &SiteUrls,
    posts: &[Post],
    build_time: DateTime<Utc>,
) -> Result<String> {
    let items: Vec<_> = posts
        .iter()
        .take(config.build.rss.limit)
        .map(|post| post_to_rss_item(post, urls))
        .collect();

    let base = &config.base;
    let copyright = (!base.copyright.is_empty()).then(|| base.copyright.clone());
    let channel = ChannelBuilder::default()
        .title(&base.title)
        .link(urls.absolute(""))
        .description(&base.description)
        .language(Some(base.language.clone()))
        .managing_editor(Some(format!("{} ({})", base.email, base.author)))
        .copyright(copyright)
        .generator(Some(GENERATOR.to_string()))
        .last_build_date(Some(to_rfc2822(&build_time)))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a post to an RSS item with a permalink guid.
fn post_to_rss_item(post: &Post, urls: &SiteUrls) -> rss::Item {
    let link = urls.absolute(&post.output_path());

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(post.summary.clone()))
        .pub_date(Some(to_rfc2822(&post.date)))
        .categories(vec![CategoryBuilder::default().name(post.category.clone()).build()])
        .build()
}
