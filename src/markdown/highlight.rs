//! Code syntax highlighting using syntect.

use crate::utils::html::escape;
use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Option<Theme>> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME
        .get_or_init(|| {
            let mut theme_set = ThemeSet::load_defaults();
            theme_set
                .themes
                .remove("InspiredGitHub")
                .or_else(|| theme_set.themes.remove("base16-ocean.light"))
        })
        .as_ref()
}

/// Replace every code block with highlighted (or escaped plain) HTML.
pub fn highlight_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut result = Vec::with_capacity(events.len());
    let mut block: Option<(Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => language_token(&info),
                    CodeBlockKind::Indented => None,
                };
                block = Some((lang, String::new()));
            }
            Event::Text(text) if block.is_some() => {
                if let Some((_, code)) = block.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, code)) = block.take() {
                    result.push(Event::Html(highlight(&code, lang.as_deref()).into()));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Highlight a code snippet for a language token.
///
/// Unknown or missing languages fall back to an escaped `<pre><code>` block.
pub fn highlight(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let highlighted = lang
        .and_then(|lang| find_syntax(ss, lang))
        .zip(theme())
        .and_then(|(syntax, theme)| highlighted_html_for_string(code, ss, syntax, theme).ok());

    match (highlighted, lang) {
        (Some(html), Some(lang)) => format!(
            "<div class=\"highlight\" data-lang=\"{}\">{html}</div>\n",
            escape(lang)
        ),
        (_, Some(lang)) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            escape(lang),
            escape(code)
        ),
        (_, None) => format!("<pre><code>{}</code></pre>\n", escape(code)),
    }
}

/// First word of a fence info string: "rust,ignore" / "rust title=x" → "rust".
fn language_token(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

fn find_syntax<'s>(ss: &'s SyntaxSet, lang: &str) -> Option<&'s SyntaxReference> {
    ss.find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_extension(lang))
}
