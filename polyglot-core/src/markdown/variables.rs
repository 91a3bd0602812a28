//! Template variable substitution inside raw markdown.
//!
//! Runs before markdown conversion so that `archives` can be laid out as
//! markdown by the content author.

use crate::models::ArchiveEntry;
use minijinja::{context, Environment};

/// Variables exposed to a content file
#[derive(Debug, Clone, Copy)]
pub struct VariableContext<'a> {
    pub archives: &'a [ArchiveEntry],
    pub assets_path: &'a str,
    pub root_path: &'a str,
    pub lang: &'a str,
}

/// Expression engine used for the substitution pass
pub struct VariableRenderer {
    env: Environment<'static>,
}

impl VariableRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Substitute variables in a raw markdown body
    pub fn render(&self, source: &str, vars: VariableContext<'_>) -> Result<String, minijinja::Error> {
        self.env.render_str(
            source,
            context! {
                archives => vars.archives,
                assets_path => vars.assets_path,
                root_path => vars.root_path,
                lang => vars.lang,
            },
        )
    }
}

impl Default for VariableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(archives: &[ArchiveEntry]) -> VariableContext<'_> {
        VariableContext {
            archives,
            assets_path: "/public/",
            root_path: "/",
            lang: "en",
        }
    }

    #[test]
    fn test_substitutes_assets_path() {
        let renderer = VariableRenderer::new();
        let out = renderer
            .render("![logo]({{ assets_path }}logo.png)\n", vars(&[]))
            .unwrap();
        assert_eq!(out, "![logo](/public/logo.png)\n");
    }

    #[test]
    fn test_archive_loop() {
        let archives = vec![
            ArchiveEntry {
                link: "/blog/a/".into(),
                title: "A".into(),
            },
            ArchiveEntry {
                link: "/blog/b/".into(),
                title: "B".into(),
            },
        ];
        let source = "{% for post in archives %}- [{{ post.title }}]({{ post.link }})\n{% endfor %}";
        let out = VariableRenderer::new().render(source, vars(&archives)).unwrap();
        assert_eq!(out, "- [A](/blog/a/)\n- [B](/blog/b/)\n");
    }

    #[test]
    fn test_plain_markdown_untouched() {
        let source = "# Title\n\nNo variables *here*.\n";
        let out = VariableRenderer::new().render(source, vars(&[])).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let result = VariableRenderer::new().render("{% for %}", vars(&[]));
        assert!(result.is_err());
    }
}
