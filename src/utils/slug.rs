//! URL slugification.
//!
//! Converts file stems, tag names and headings to URL-safe identifiers:
//! accents are transliterated (`deunicode`), letters lowercased, runs of
//! whitespace, `-` and `_` become a single hyphen, and all other punctuation
//! is dropped.

use deunicode::deunicode;

/// Maximum slug length in bytes (slugs are pure ASCII).
pub const MAX_SLUG_LEN: usize = 80;

/// Convert text to a URL-safe slug of at most [`MAX_SLUG_LEN`] characters.
///
/// May return an empty string when the input has no alphanumeric content.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        let trimmed = slug.trim_end_matches('-').len();
        slug.truncate(trimmed);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("hello_world"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Rust & Safety!"), "rust-safety");
        assert_eq!(slugify("C++ (Part 2): Templates?"), "c-part-2-templates");
        assert_eq!(slugify("don't panic"), "dont-panic");
        assert_eq!(slugify("node.js-tips"), "nodejs-tips");
    }

    #[test]
    fn test_slugify_strips_accents() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Über Straße"), "uber-strasse");
    }

    #[test]
    fn test_slugify_collapses_hyphens() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--leading-and-trailing--"), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_truncates() {
        let long = "word ".repeat(40);
        let slug = slugify(&long);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
        assert!(slug.starts_with("word-word"));
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_output_alphabet() {
        for input in ["2024-01-05 Ça va?", "Ünïcödé_Fïlé", "tabs\tand\nlines"] {
            let slug = slugify(input);
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{slug}"
            );
            assert!(!slug.contains("--"));
        }
    }
}
