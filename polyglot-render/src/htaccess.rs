//! Apache rewrite rules mapping pretty URLs onto the generated page files.

use polyglot_core::{Config, Language};
use std::fmt::Write;

/// Rules for the output root
///
/// Non-default languages come first so their prefixed URLs never fall
/// through to the unprefixed default-language patterns.
pub fn root_rules(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("# Generated by polyglot\n\n");
    out.push_str("RewriteEngine On\n\n");

    let Some((default, others)) = config.languages.split_first() else {
        return out;
    };

    // Trailing slash
    out.push_str("<IfModule mod_rewrite.c>\n");
    out.push_str("RewriteCond %{REQUEST_URI} /+[^\\.]+$\n");
    out.push_str("RewriteRule ^(.+[^/])$ %{REQUEST_URI}/ [R=301,L]\n");
    out.push_str("</IfModule>\n\n");

    for language in others {
        for post_type in &config.post_types {
            let _ = writeln!(out, "# {} ({})", post_type.key, language.key);
            let _ = writeln!(
                out,
                "RewriteRule {lang}/{archive}/(.+[^/])/ pages/{lang}/{key}-$1.html [NC,L]",
                lang = language.key,
                archive = post_type.archive,
                key = post_type.key,
            );
        }
    }
    out.push('\n');

    for post_type in &config.post_types {
        let _ = writeln!(out, "# {} ({})", post_type.key, default.key);
        let _ = writeln!(
            out,
            "RewriteRule {archive}/(.+[^/])/ pages/{lang}/{key}-$1.html [NC,L]",
            lang = default.key,
            archive = post_type.archive,
            key = post_type.key,
        );
    }
    out.push('\n');

    for language in others {
        let _ = writeln!(out, "# {}", language.key);
        let _ = writeln!(
            out,
            "RewriteRule ^{lang}/([^\\.]+)/$ pages/{lang}/page-$1.html",
            lang = language.key
        );
        let _ = writeln!(
            out,
            "RewriteRule ^{lang}/$ pages/{lang}/index.html\n",
            lang = language.key
        );
    }

    let _ = writeln!(out, "# {}", default.key);
    let _ = writeln!(
        out,
        "RewriteRule ^([^\\.]+)/$ pages/{}/page-$1.html",
        default.key
    );
    let _ = writeln!(out, "RewriteRule ^$ pages/{}/index.html", default.key);

    out
}

/// Not-found rule for one language directory
pub fn language_rules(config: &Config, language: &Language) -> String {
    format!(
        "ErrorDocument 404 {}pages/{}/404.html\n",
        config.site.root_path, language.key
    )
}
