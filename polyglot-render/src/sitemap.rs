//! sitemap.xml generation from the site path list.

use polyglot_core::SitePath;

/// Generate sitemap.xml for every path, in path-list order
pub fn generate_sitemap(domain: &str, paths: &[SitePath]) -> String {
    let mut urls = String::new();

    for path in paths {
        urls.push_str("<url>");
        urls.push_str(&format!(
            "<loc>{}</loc>",
            escape_xml(&absolute_url(domain, &path.path))
        ));
        urls.push_str("</url>\n");
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}</urlset>
"#,
        urls
    )
}

fn absolute_url(domain: &str, path: &str) -> String {
    format!(
        "{}/{}",
        domain.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
