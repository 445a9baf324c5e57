//! Client-side search index and tag map.
//!
//! Both documents are consumed by the site's scripts, so field names are a
//! stable contract:
//!
//! ```json
//! [{ "title": "..", "summary": "..", "tags": [".."], "category": "..",
//!    "url": "/posts/x.html", "date": "2024-01-15T00:00:00Z",
//!    "cover": "/img/x.png", "tagSlugs": { "Web Dev": "web-dev" } }]
//! ```

use crate::{
    content::{Post, TagMap, tag_slug},
    utils::{date::to_iso, url::SiteUrls},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// One `search-index.json` record per post.
#[derive(Debug, Serialize)]
pub struct SearchRecord<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub tags: &'a [String],
    pub category: &'a str,
    pub url: String,
    pub date: String,
    pub cover: String,
    #[serde(rename = "tagSlugs")]
    pub tag_slugs: BTreeMap<&'a str, String>,
}

/// Lightweight post summary in `tags.json`.
#[derive(Debug, Serialize)]
pub struct TagEntry<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub category: &'a str,
    pub date: String,
    pub url: String,
    pub cover: String,
}

/// Search records in post order.
pub fn search_index<'a>(posts: &'a [Post], urls: &SiteUrls) -> Vec<SearchRecord<'a>> {
    posts
        .iter()
        .map(|post| SearchRecord {
            title: &post.title,
            summary: &post.summary,
            tags: &post.tags,
            category: &post.category,
            url: urls.path(&post.output_path()),
            date: to_iso(&post.date),
            cover: urls.resolve(&post.cover),
            tag_slugs: post.tags.iter().map(|tag| (tag.as_str(), tag_slug(tag))).collect(),
        })
        .collect()
}

/// Tag → post summaries, keys sorted, lists in post order.
pub fn tag_index<'a>(tags: &TagMap<'a>, urls: &SiteUrls) -> BTreeMap<&'a str, Vec<TagEntry<'a>>> {
    tags.iter()
        .map(|(tag, posts)| {
            let entries = posts
                .iter()
                .map(|post| TagEntry {
                    title: &post.title,
                    summary: &post.summary,
                    category: &post.category,
                    date: to_iso(&post.date),
                    url: urls.path(&post.output_path()),
                    cover: urls.resolve(&post.cover),
                })
                .collect();
            (*tag, entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{fixtures::post, tag_map};
    use serde_json::json;

    fn urls() -> SiteUrls {
        SiteUrls::new("https://alice.github.io", "/notes").unwrap()
    }

    #[test]
    fn test_search_record_shape() {
        let posts = vec![post("hello", "2024-01-15", "Tech", &["Web Dev", "rust"])];
        let index = search_index(&posts, &urls());
        let value = serde_json::to_value(&index).unwrap();

        assert_eq!(
            value,
            json!([{
                "title": "Title hello",
                "summary": "Summary of hello",
                "tags": ["Web Dev", "rust"],
                "category": "Tech",
                "url": "/notes/posts/hello.html",
                "date": "2024-01-15T00:00:00Z",
                "cover": "/notes/images/hello.png",
                "tagSlugs": { "Web Dev": "web-dev", "rust": "rust" }
            }])
        );
    }

    #[test]
    fn test_tag_index_sorted_in_post_order() {
        let posts = vec![
            post("b", "2024-02-01", "Tech", &["web", "css"]),
            post("a", "2024-01-01", "Life", &["web"]),
        ];
        let tags = tag_map(&posts);
        let index = tag_index(&tags, &urls());
        let value = serde_json::to_value(&index).unwrap();

        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["css", "web"]);
        assert_eq!(value["web"][0]["url"], "/notes/posts/b.html");
        assert_eq!(value["web"][1]["url"], "/notes/posts/a.html");
        assert_eq!(value["web"][1]["category"], "Life");
        assert_eq!(value["web"][1]["date"], "2024-01-01T00:00:00Z");
        assert!(value["web"][0].get("tags").is_none());
    }
}
