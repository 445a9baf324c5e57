//! Link, image and raw HTML rewriting.
//!
//! | Source                    | Output                                                   |
//! |---------------------------|----------------------------------------------------------|
//! | `[x](https://other.org)`  | `<a href=".." target="_blank" rel="noopener noreferrer">` |
//! | `[x](/about.html)`        | unchanged                                                |
//! | `[x](#usage)`             | unchanged                                                |
//! | `[x](mailto:a@b.c)`       | unchanged                                                |
//! | `[x](javascript:alert())` | `href="#"`                                               |
//! | `![alt](a.png)`           | `<img src="a.png" alt="alt" loading="lazy" ...>`         |

use crate::utils::{html::escape, url::SiteUrls};
use html_escape::decode_html_entities;
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use regex::Regex;
use std::sync::LazyLock;

/// Schemes that execute code when followed.
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Raw HTML that is escaped rather than passed through.
static RE_UNSAFE_HTML: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\s*/?\s*(?:script|style|iframe|object|embed)\b|(?:^|[\s/"'])on[a-z]+\s*="#)
        .expect("static regex")
});

/// Script protocols inside raw HTML, matched after entity decoding.
static RE_UNSAFE_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:javascript|vbscript):").expect("static regex"));

/// Add `target`/`rel` to external anchors and neutralize script-protocol targets.
pub fn rewrite_links<'a>(events: Vec<Event<'a>>, urls: &SiteUrls) -> Vec<Event<'a>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                if is_unsafe_target(&dest_url) {
                    Event::Start(Tag::Link {
                        link_type,
                        dest_url: CowStr::Borrowed("#"),
                        title,
                        id,
                    })
                } else if urls.is_external(&dest_url) {
                    Event::Html(open_external_anchor(&dest_url, &title).into())
                } else {
                    Event::Start(Tag::Link {
                        link_type,
                        dest_url,
                        title,
                        id,
                    })
                }
            }
            other => other,
        })
        .collect()
}

/// Emit every image as a lazily loaded `<img>`.
pub fn lazy_images(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut result = Vec::with_capacity(events.len());
    let mut image: Option<(String, String, String)> = None;
    // Images nested inside alt text only contribute their own alt text
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                if image.is_none() {
                    let src = if is_unsafe_target(&dest_url) {
                        "#".to_owned()
                    } else {
                        dest_url.to_string()
                    };
                    image = Some((src, title.to_string(), String::new()));
                } else {
                    depth += 1;
                }
            }
            Event::End(TagEnd::Image) if depth > 0 => depth -= 1,
            Event::End(TagEnd::Image) => {
                if let Some((src, title, alt)) = image.take() {
                    result.push(Event::Html(img_tag(&src, &alt, &title).into()));
                }
            }
            Event::Text(text) | Event::Code(text) if image.is_some() => {
                if let Some((_, _, alt)) = image.as_mut() {
                    alt.push_str(&text);
                }
            }
            _ if image.is_some() => {}
            other => result.push(other),
        }
    }

    result
}

/// Escape raw HTML fragments that carry scripts, embeds or event handlers.
///
/// An HTML block arrives as one event per line, so blocks are judged as a
/// whole: one unsafe line escapes the entire block.
pub fn sanitize_raw_html(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut result = Vec::with_capacity(events.len());
    let mut block: Option<Vec<Event>> = None;

    for event in events {
        match event {
            Event::Start(Tag::HtmlBlock) => {
                result.push(Event::Start(Tag::HtmlBlock));
                block = Some(Vec::new());
            }
            Event::End(TagEnd::HtmlBlock) => {
                if let Some(inner) = block.take() {
                    result.extend(escape_block_if_unsafe(inner));
                }
                result.push(Event::End(TagEnd::HtmlBlock));
            }
            event if block.is_some() => {
                if let Some(inner) = block.as_mut() {
                    inner.push(event);
                }
            }
            Event::Html(raw) | Event::InlineHtml(raw) if is_unsafe_html(&raw) => {
                result.push(Event::Text(raw));
            }
            other => result.push(other),
        }
    }

    result
}

fn escape_block_if_unsafe(inner: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let source: String = inner
        .iter()
        .filter_map(|event| match event {
            Event::Html(raw) => Some(&**raw),
            _ => None,
        })
        .collect();
    if !is_unsafe_html(&source) {
        return inner;
    }

    inner
        .into_iter()
        .map(|event| match event {
            Event::Html(raw) => Event::Text(raw),
            other => other,
        })
        .collect()
}

/// Character references are decoded first, and tab/newline characters that
/// browsers drop inside urls are ignored when looking for script protocols.
fn is_unsafe_html(raw: &str) -> bool {
    let decoded = decode_html_entities(raw);
    if RE_UNSAFE_HTML.is_match(&decoded) {
        return true;
    }
    let compact: String = decoded
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    RE_UNSAFE_SCHEME.is_match(&compact)
}

fn is_unsafe_target(dest: &str) -> bool {
    let dest = dest.trim_start().to_ascii_lowercase();
    UNSAFE_SCHEMES.iter().any(|scheme| dest.starts_with(scheme))
}

fn open_external_anchor(href: &str, title: &str) -> String {
    let mut tag = format!("<a href=\"{}\"", escape(href));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape(title)));
    }
    tag.push_str(" target=\"_blank\" rel=\"noopener noreferrer\">");
    tag
}

fn img_tag(src: &str, alt: &str, title: &str) -> String {
    let mut tag = format!("<img src=\"{}\" alt=\"{}\"", escape(src), escape(alt));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape(title)));
    }
    tag.push_str(" loading=\"lazy\" decoding=\"async\" />");
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::{Parser, html};

    fn urls() -> SiteUrls {
        SiteUrls::new("https://alice.github.io", "/notes").unwrap()
    }

    fn render(markdown: &str) -> String {
        let events: Vec<_> = Parser::new(markdown).collect();
        let events = sanitize_raw_html(events);
        let events = rewrite_links(events, &urls());
        let events = lazy_images(events);
        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    #[test]
    fn test_external_link_opens_new_context() {
        let out = render("[Rust](https://www.rust-lang.org \"home\")");
        assert!(out.contains(
            r#"<a href="https://www.rust-lang.org" title="home" target="_blank" rel="noopener noreferrer">Rust</a>"#
        ));
    }

    #[test]
    fn test_external_autolink() {
        let out = render("<https://crates.io>");
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains("https://crates.io</a>"));
    }

    #[test]
    fn test_internal_links_unchanged() {
        for markdown in [
            "[a](#usage)",
            "[a](/about.html)",
            "[a](posts/other.html)",
            "[a](mailto:alice@example.com)",
            "[a](tel:+15550100)",
            "[a](https://alice.github.io/notes/)",
        ] {
            let out = render(markdown);
            assert!(!out.contains("target="), "{markdown} -> {out}");
            assert!(!out.contains("rel="), "{markdown} -> {out}");
        }
        assert!(render("[a](#usage)").contains(r##"<a href="#usage">"##));
        assert!(render("[a](/about.html)").contains(r#"<a href="/about.html">"#));
    }

    #[test]
    fn test_script_protocol_neutralized() {
        let out = render("[click](javascript:alert(1))");
        assert!(out.contains(r##"<a href="#">click</a>"##));
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn test_images_are_lazy() {
        let out = render("![A *cat*](cat.png \"Cat\") and ![dog](https://cdn.example.com/dog.jpg)");
        assert_eq!(out.matches("<img").count(), 2);
        assert_eq!(out.matches(r#"loading="lazy""#).count(), 2);
        assert!(out.contains(r#"<img src="cat.png" alt="A cat" title="Cat" loading="lazy""#));
    }

    #[test]
    fn test_image_inside_link() {
        let out = render("[![badge](badge.svg)](https://ci.example.com)");
        assert!(out.contains(r#"loading="lazy""#));
        assert!(out.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_raw_script_is_escaped() {
        let out = render("<script>alert(1)</script>\n\nok <b onclick=\"x()\">bold</b>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<b onclick"));
    }

    #[test]
    fn test_wrapped_event_handler_is_escaped() {
        let out = render("<div\nonclick=\"alert(1)\">hi</div>\n");
        assert!(!out.contains("<div"));
        assert!(out.contains("&lt;div"));

        let out = render("<div class=\"note\"\n  onmouseover=\"x()\">\nhi\n</div>\n");
        assert!(!out.contains("<div"));
    }

    #[test]
    fn test_entity_encoded_scheme_is_escaped() {
        let out = render("<a href=\"&#106;avascript:alert(1)\">x</a>");
        assert!(!out.contains("<a href"));
        assert!(out.contains("&lt;a href"));

        let out = render("<a href=\"java&#x09;script&#58;alert(1)\">x</a>");
        assert!(!out.contains("<a href"));
    }

    #[test]
    fn test_wrapped_safe_block_passes_through() {
        let out = render("<div\nclass=\"note\">hi</div>\n");
        assert!(out.contains("<div\nclass=\"note\">hi</div>"));
    }

    #[test]
    fn test_safe_raw_html_passes_through() {
        let out = render("<details><summary>More</summary>\n\nhidden\n\n</details>");
        assert!(out.contains("<details>"));
    }
}
