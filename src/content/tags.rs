//! Tag grouping.

use super::Post;
use crate::utils::slug::slugify;
use std::collections::BTreeMap;

/// Tag name → posts carrying it, keys sorted, each list in post order.
pub type TagMap<'a> = BTreeMap<&'a str, Vec<&'a Post>>;

/// Slug for tags without any alphanumeric characters.
const FALLBACK_TAG_SLUG: &str = "tag";

/// Group posts by tag. `posts` must already be in listing order.
pub fn tag_map(posts: &[Post]) -> TagMap<'_> {
    let mut map = TagMap::new();
    for post in posts {
        for tag in &post.tags {
            map.entry(tag.as_str()).or_default().push(post);
        }
    }
    map
}

/// URL-safe slug for tag page paths and client-side filters.
pub fn tag_slug(tag: &str) -> String {
    let slug = slugify(tag);
    if slug.is_empty() {
        FALLBACK_TAG_SLUG.to_owned()
    } else {
        slug
    }
}
