//! Post discovery, validation and normalization.

use super::{
    ContentError, Post,
    frontmatter::{self, Frontmatter},
};
use crate::{
    log,
    markdown::MarkdownRenderer,
    utils::{date::parse_date, slug::slugify},
};
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Markdown file extensions picked up from the content directory.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Load every post under `dir`, sorted newest first (ties by slug).
///
/// The first invalid file aborts loading.
pub fn load_posts(dir: &Path, renderer: &MarkdownRenderer) -> Result<Vec<Post>, ContentError> {
    let files = collect_markdown_files(dir)?;

    let mut posts: Vec<Post> = Vec::with_capacity(files.len());
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for path in files {
        let post = load_post(&path, renderer)?;
        if let Some(&first) = seen.get(&post.slug) {
            return Err(ContentError::DuplicateSlug {
                slug: post.slug,
                first: posts[first].source.clone(),
                second: post.source,
            });
        }
        seen.insert(post.slug.clone(), posts.len());
        posts.push(post);
    }

    sort_posts(&mut posts);
    log!("content"; "loaded {} posts from {}", posts.len(), dir.display());
    Ok(posts)
}

/// Newest first, slug ascending on equal dates.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}

/// Markdown files under `dir`, sorted by path.
fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| ContentError::Walk(dir.to_path_buf(), err))?;
        let is_markdown = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Read, validate and render a single post.
pub fn load_post(path: &Path, renderer: &MarkdownRenderer) -> Result<Post, ContentError> {
    let content = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    let (fm, body) = Frontmatter::parse(&content).map_err(|source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;

    let title = fm.text(frontmatter::TITLE);
    let date = fm.text(frontmatter::DATE);
    let category = fm.text(frontmatter::CATEGORY);
    let summary = fm.text(frontmatter::SUMMARY);
    let reading_time = fm.reading_time();
    let tags = fm.tags();
    let cover = fm.text(frontmatter::COVER);

    let missing: Vec<&'static str> = [
        ("title", title.is_none()),
        ("date", date.is_none()),
        ("category", category.is_none()),
        ("summary", summary.is_none()),
        ("readingTime", reading_time.is_none()),
        ("tags", tags.is_empty()),
        ("cover", cover.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    if !missing.is_empty() {
        return Err(ContentError::MissingFields {
            path: path.to_path_buf(),
            fields: missing,
        });
    }
    let raw_date = date.unwrap_or_default();

    let date = parse_date(&raw_date).ok_or_else(|| ContentError::InvalidDate {
        path: path.to_path_buf(),
        raw: raw_date,
    })?;

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let slug = slugify(stem);
    if slug.is_empty() {
        return Err(ContentError::EmptySlug(path.to_path_buf()));
    }

    let rendered = renderer.render(&body);

    Ok(Post {
        slug,
        title: collapse_whitespace(&title.unwrap_or_default()),
        date,
        category: collapse_whitespace(&category.unwrap_or_default()),
        summary: collapse_whitespace(&summary.unwrap_or_default()),
        reading_time: reading_time.unwrap_or_default(),
        tags,
        cover: cover.unwrap_or_default(),
        html: rendered.html,
        text: rendered.text,
        source: path.to_path_buf(),
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::url::SiteUrls;
    use tempfile::TempDir;

    fn urls() -> SiteUrls {
        SiteUrls::new("https://example.com", "").unwrap()
    }

    fn write_post(dir: &Path, name: &str, date: &str) {
        let content = format!(
            "---\ntitle: \"{name}\"\ndate: {date}\ncategory: Tech\nsummary: |\n  About\n  {name}\nreadingTime: 5\ntags: [rust]\ncover: /img/{name}.png\n---\nBody of **{name}**\n"
        );
        fs::write(dir.join(format!("{name}.md")), content).unwrap();
    }

    #[test]
    fn test_load_and_sort() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "older", "2023-05-01");
        write_post(dir.path(), "newer", "2024-02-10");
        write_post(dir.path(), "same-day-b", "2023-05-01");
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let urls = urls();
        let posts = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["newer", "older", "same-day-b"]);
        for pair in posts.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        assert_eq!(posts[0].summary, "About newer");
        assert_eq!(posts[0].reading_time, "5 min read");
        assert!(posts[0].html.contains("<strong>newer</strong>"));
    }

    #[test]
    fn test_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2024");
        fs::create_dir_all(&nested).unwrap();
        write_post(&nested, "deep", "2024-01-01");

        let urls = urls();
        let posts = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "deep");
    }

    #[test]
    fn test_missing_fields_are_all_named() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("broken.md"),
            "---\ntitle: Broken\ndate: 2024-01-01\ncategory: Tech\n---\nBody\n",
        )
        .unwrap();

        let urls = urls();
        let err = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap_err();
        match err {
            ContentError::MissingFields { path, fields } => {
                assert!(path.ends_with("broken.md"));
                assert_eq!(fields, vec!["summary", "readingTime", "tags", "cover"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_date() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "bad", "last tuesday");

        let urls = urls();
        let err = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { ref raw, .. } if raw == "last tuesday"));
    }

    #[test]
    fn test_duplicate_slug() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "Hello World", "2024-01-01");
        write_post(dir.path(), "hello-world", "2024-01-02");

        let urls = urls();
        let err = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap_err();
        match err {
            ContentError::DuplicateSlug { slug, first, second } => {
                assert_eq!(slug, "hello-world");
                assert!(first.ends_with("Hello World.md"));
                assert!(second.ends_with("hello-world.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multiline_title_is_single_line() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("wrapped.md"),
            "---\ntitle: |\n  Hello\n  World\ndate: 2024-01-01\ncategory: >-\n  Tech\n  Notes\nsummary: s\nreadingTime: 1\ntags: [x]\ncover: /c.png\n---\nBody\n",
        )
        .unwrap();

        let urls = urls();
        let posts = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap();
        assert_eq!(posts[0].title, "Hello World");
        assert_eq!(posts[0].category, "Tech Notes");
    }

    #[test]
    fn test_empty_slug() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "!!!", "2024-01-01");

        let urls = urls();
        let err = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap_err();
        assert!(matches!(err, ContentError::EmptySlug(_)));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let urls = urls();
        let posts = load_posts(dir.path(), &MarkdownRenderer::new(&urls)).unwrap();
        assert!(posts.is_empty());
    }
}
