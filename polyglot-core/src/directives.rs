//! Directive extraction from raw markdown.
//!
//! Directives are hidden markdown comments of the form `[//]: # "Key: value"`.
//! They are read from the raw text, never from rendered output.

use crate::models::Directives;
use regex::Regex;
use std::sync::OnceLock;

static TITLE_REGEX: OnceLock<Regex> = OnceLock::new();
static ORIGINAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn title_regex() -> &'static Regex {
    TITLE_REGEX.get_or_init(|| Regex::new(r#"\[//\]: # "Title: (.+)""#).unwrap())
}

fn original_regex() -> &'static Regex {
    ORIGINAL_REGEX.get_or_init(|| Regex::new(r#"\[//\]: # "Original: (.+)""#).unwrap())
}

/// Extract the `Title:` and `Original:` directives
///
/// # Example
///
/// ```
/// use polyglot_core::directives::parse_directives;
///
/// let content = "[//]: # \"Original: blog-foo.md\"\n\n# Article\n";
/// let directives = parse_directives(content);
/// assert_eq!(directives.original.as_deref(), Some("blog-foo.md"));
/// assert_eq!(directives.title, None);
/// ```
pub fn parse_directives(content: &str) -> Directives {
    Directives {
        title: capture(title_regex(), content),
        original: capture(original_regex(), content),
    }
}

fn capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_directives() {
        let content = r#"[//]: # "Title: À propos"
[//]: # "Original: page-about.md"

# A propos de nous

Texte."#;

        let directives = parse_directives(content);
        assert_eq!(directives.title.as_deref(), Some("À propos"));
        assert_eq!(directives.original.as_deref(), Some("page-about.md"));
    }

    #[test]
    fn test_no_directives() {
        let directives = parse_directives("# Just Content\n\nNo directives here.");
        assert_eq!(directives, Directives::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let content = "[//]: # \"Title: First\"\n[//]: # \"Title: Second\"\n";
        assert_eq!(parse_directives(content).title.as_deref(), Some("First"));
    }

    #[test]
    fn test_directive_needs_comment_syntax() {
        let content = "Title: Plain text\n\nOriginal: page-about.md\n";
        assert_eq!(parse_directives(content), Directives::default());
    }
}
