//! Pre-rendered HTML fragments shared by several pages.

use crate::{
    content::{Post, Project, tag_slug},
    utils::{
        date::{to_display, to_iso},
        html::escape,
        url::SiteUrls,
    },
};

/// Listing card for a post. `data-*` attributes drive client-side filtering.
pub fn post_card(post: &Post, urls: &SiteUrls) -> String {
    let href = urls.path(&post.output_path());
    let tag_slugs: Vec<String> = post.tags.iter().map(|t| tag_slug(t)).collect();

    format!(
        r#"<article class="post-card" data-category="{category}" data-tags="{tag_slugs}">
  <a class="post-card-cover" href="{href}"><img src="{cover}" alt="{title}" loading="lazy" decoding="async" /></a>
  <div class="post-card-body">
    <div class="post-meta"><time datetime="{iso}">{date}</time><span class="post-category">{category}</span><span class="post-reading-time">{reading_time}</span></div>
    <h3 class="post-card-title"><a href="{href}">{title}</a></h3>
    <p class="post-card-summary">{summary}</p>
    {tags}
  </div>
</article>
"#,
        category = escape(&post.category),
        tag_slugs = tag_slugs.join(" "),
        href = escape(&href),
        cover = escape(&urls.resolve(&post.cover)),
        title = escape(&post.title),
        iso = to_iso(&post.date),
        date = to_display(&post.date),
        reading_time = escape(&post.reading_time),
        summary = escape(&post.summary),
        tags = tag_list(&post.tags, urls),
    )
}

/// Cards for a sequence of posts, concatenated.
pub fn post_cards<'a>(posts: impl IntoIterator<Item = &'a Post>, urls: &SiteUrls) -> String {
    posts.into_iter().map(|post| post_card(post, urls)).collect()
}

/// Link to a tag page.
pub fn tag_link(tag: &str, urls: &SiteUrls) -> String {
    format!(
        r#"<a class="tag" href="{}">{}</a>"#,
        escape(&urls.path(&format!("tags/{}.html", tag_slug(tag)))),
        escape(tag)
    )
}

/// Tag link annotated with a post count.
pub fn tag_link_with_count(tag: &str, count: usize, urls: &SiteUrls) -> String {
    format!(
        r#"<a class="tag" href="{}">{} <span class="tag-count">{count}</span></a>"#,
        escape(&urls.path(&format!("tags/{}.html", tag_slug(tag)))),
        escape(tag)
    )
}

/// `<ul>` of tag links, empty for no tags.
pub fn tag_list(tags: &[String], urls: &SiteUrls) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let items: String = tags
        .iter()
        .map(|tag| format!("<li>{}</li>", tag_link(tag, urls)))
        .collect();
    format!(r#"<ul class="tag-list">{items}</ul>"#)
}

/// Compact entry for the related-posts list.
pub fn related_item(post: &Post, urls: &SiteUrls) -> String {
    format!(
        r#"<li class="related-post"><a href="{}">{}</a><time datetime="{}">{}</time></li>"#,
        escape(&urls.path(&post.output_path())),
        escape(&post.title),
        to_iso(&post.date),
        to_display(&post.date),
    )
}

/// `<option>` element for a filter dropdown.
pub fn option(value: &str, label: &str) -> String {
    format!(
        r#"<option value="{}">{}</option>"#,
        escape(value),
        escape(label)
    )
}

/// Showcase card for a project.
pub fn project_card(project: &Project, urls: &SiteUrls) -> String {
    let name = escape(&project.name);
    let heading = match project.url.as_deref() {
        Some(url) => anchor(url, &name, urls),
        None => name.into_owned(),
    };
    let repository = project
        .repository
        .as_deref()
        .map(|repo| format!(r#"<p class="project-repo">{}</p>"#, anchor(repo, "Source", urls)))
        .unwrap_or_default();
    let tags: String = project
        .tags
        .iter()
        .map(|tag| format!(r#"<li class="project-tag">{}</li>"#, escape(tag)))
        .collect();
    let tags = if tags.is_empty() {
        tags
    } else {
        format!(r#"<ul class="tag-list">{tags}</ul>"#)
    };

    format!(
        r#"<article class="project-card">
  <h3 class="project-name">{heading}</h3>
  <p class="project-description">{description}</p>
  {tags}
  {repository}
</article>
"#,
        description = escape(&project.description),
    )
}

/// Anchor whose target is resolved against the site; external targets open
/// in a new browsing context. `label` must already be escaped.
fn anchor(target: &str, label: &str, urls: &SiteUrls) -> String {
    let href = urls.resolve(target);
    let rel = if urls.is_external(&href) {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(r#"<a href="{}"{rel}>{label}</a>"#, escape(&href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::post;

    fn urls() -> SiteUrls {
        SiteUrls::new("https://alice.github.io", "/notes").unwrap()
    }

    #[test]
    fn test_post_card() {
        let mut p = post("hello", "2024-01-15", "Tech & Life", &["Rust", "Web Dev"]);
        p.title = "Hello <World>".into();
        let card = post_card(&p, &urls());

        assert!(card.contains(r#"href="/notes/posts/hello.html""#));
        assert!(card.contains(r#"data-category="Tech &amp; Life""#));
        assert!(card.contains(r#"data-tags="rust web-dev""#));
        assert!(card.contains("Hello &lt;World&gt;"));
        assert!(card.contains(r#"<time datetime="2024-01-15T00:00:00Z">January 15, 2024</time>"#));
        assert!(card.contains(r#"src="/notes/images/hello.png""#));
        assert!(card.contains(r#"loading="lazy""#));
        assert!(card.contains(r#"href="/notes/tags/web-dev.html""#));
    }

    #[test]
    fn test_tag_list_empty() {
        assert_eq!(tag_list(&[], &urls()), "");
    }

    #[test]
    fn test_project_card_links() {
        let project = Project {
            name: "folio".into(),
            description: "Generator".into(),
            url: Some("demos/folio.html".into()),
            repository: Some("https://github.com/alice/folio".into()),
            tags: vec!["rust".into()],
        };
        let card = project_card(&project, &urls());

        assert!(card.contains(r#"<a href="/notes/demos/folio.html">folio</a>"#));
        assert!(card.contains(
            r#"<a href="https://github.com/alice/folio" target="_blank" rel="noopener noreferrer">Source</a>"#
        ));
        assert!(card.contains(r#"<li class="project-tag">rust</li>"#));
    }

    #[test]
    fn test_option_escapes() {
        assert_eq!(option("a&b", "A & B"), r#"<option value="a&amp;b">A &amp; B</option>"#);
    }
}
