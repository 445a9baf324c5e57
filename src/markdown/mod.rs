//! Markdown to HTML conversion.
//!
//! # Pipeline
//!
//! ```text
//! Parser::new_ext()
//!     │
//!     ├── plain_text()          → search/summary text
//!     │
//!     ├── sanitize_raw_html()   → escape scripts, embeds, event handlers
//!     ├── highlight_code_blocks()
//!     ├── rewrite_links()       → external anchors open in a new context
//!     ├── lazy_images()
//!     ├── attach_heading_ids()
//!     │
//!     └── html::push_html()     → body HTML
//! ```
//!
//! Stages that emit `Event::Html` run after sanitization so generated
//! markup is never escaped.

mod highlight;
mod links;

use crate::utils::{slug::slugify, url::SiteUrls};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashMap;

/// Output of a single Markdown conversion.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// Sanitized body HTML.
    pub html: String,
    /// Whitespace-collapsed plain text of the body.
    pub text: String,
}

/// Markdown renderer bound to a site origin (for external-link detection).
pub struct MarkdownRenderer<'a> {
    urls: &'a SiteUrls,
    options: Options,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(urls: &'a SiteUrls) -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { urls, options }
    }

    /// Convert a Markdown body to HTML and plain text.
    pub fn render(&self, markdown: &str) -> Rendered {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        let text = plain_text(&events);

        let events = links::sanitize_raw_html(events);
        let events = highlight::highlight_code_blocks(events);
        let events = links::rewrite_links(events, self.urls);
        let events = links::lazy_images(events);
        let events = attach_heading_ids(events);

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        Rendered {
            html: html_output,
            text,
        }
    }
}

/// Collect text content, separating blocks with spaces.
fn plain_text(events: &[Event]) -> String {
    let mut raw = String::new();
    for event in events {
        match event {
            Event::Text(text) | Event::Code(text) => raw.push_str(text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => raw.push(' '),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Give every heading without an explicit `{#id}` a unique slug id.
fn attach_heading_ids(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut result = Vec::with_capacity(events.len());
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();
    let mut pending: Option<(Tag, Vec<Event>, String)> = None;

    for event in events {
        match event {
            Event::Start(tag @ Tag::Heading { id: None, .. }) => {
                pending = Some((tag, Vec::new(), String::new()));
            }
            Event::End(TagEnd::Heading(level)) if pending.is_some() => {
                if let Some((tag, inner, title)) = pending.take() {
                    let id = unique_id(&mut seen, &title);
                    let tag = match tag {
                        Tag::Heading {
                            level, classes, attrs, ..
                        } => Tag::Heading {
                            level,
                            id: (!id.is_empty()).then(|| CowStr::from(id)),
                            classes,
                            attrs,
                        },
                        other => other,
                    };
                    result.push(Event::Start(tag));
                    result.extend(inner);
                }
                result.push(Event::End(TagEnd::Heading(level)));
            }
            event => match pending.as_mut() {
                Some((_, inner, title)) => {
                    if let Event::Text(text) | Event::Code(text) = &event {
                        title.push_str(text);
                    }
                    inner.push(event);
                }
                None => result.push(event),
            },
        }
    }

    result
}

fn unique_id(seen: &mut FxHashMap<String, usize>, title: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        return base;
    }
    let count = seen.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{base}-{}", *count - 1)
    }
}
