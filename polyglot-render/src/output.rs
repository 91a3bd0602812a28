//! Writes a resolved site graph to the output directory.
//!
//! Every artifact is produced in memory first, written to a staging directory
//! beside the output, and swapped into place in one rename. A failed build
//! leaves the previous output untouched; a successful one leaves nothing from
//! it behind.

use crate::htaccess::{language_rules, root_rules};
use crate::sitemap::generate_sitemap;
use crate::templates::{PageContext, PageRenderer, TemplateError};
use polyglot_core::{Config, SiteGraph};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize site graph: {0}")]
    Json(#[from] serde_json::Error),
}

/// A file waiting to be written, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: String,
    pub contents: String,
}

impl OutputFile {
    fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Render every artifact of the site without touching the disk
pub fn render_site(config: &Config, graph: &SiteGraph) -> Result<Vec<OutputFile>, RenderError> {
    let mut files = Vec::new();

    match config.templates_dir() {
        Some(dir) => {
            let renderer = PageRenderer::new(&dir, &config.template_extension);
            let urls = graph.url_map();
            for page in &graph.pages {
                let ctx = PageContext::for_page(page, config, &urls);
                let html = renderer.render(&page.template_id, &ctx)?;
                files.push(OutputFile::new(&page.html_output_path, html));
            }
            for page in &graph.not_found {
                let ctx = PageContext::for_not_found(page, config, &urls);
                let html = renderer.render(&page.template_id, &ctx)?;
                files.push(OutputFile::new(&page.html_output_path, html));
            }
        }
        None => tracing::info!("No templates directory configured; skipping page HTML"),
    }

    files.push(OutputFile::new(
        "sitemap.xml",
        generate_sitemap(&config.site.domain, &graph.paths),
    ));

    files.push(OutputFile::new(".htaccess", root_rules(config)));
    for language in &config.languages {
        files.push(OutputFile::new(
            format!("pages/{}/.htaccess", language.key),
            language_rules(config, language),
        ));
    }

    files.push(OutputFile::new(
        "site-graph.json",
        serde_json::to_string_pretty(graph)?,
    ));

    Ok(files)
}

/// Render the site, then replace the configured output directory with it
pub fn write_site(config: &Config, graph: &SiteGraph) -> Result<usize, RenderError> {
    let files = render_site(config, graph)?;
    let output_dir = config.output_dir();
    let parent = match output_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(io_error(&parent))?;

    let staging = scratch_dir(&parent, ".polyglot-staging-")?;
    for file in &files {
        write_file(&staging.path().join(&file.path), &file.contents)?;
    }
    publish(staging, &output_dir, &parent)?;

    tracing::info!("Wrote {} files to {:?}", files.len(), output_dir);
    Ok(files.len())
}

/// Swap the staged tree in; the previous output is removed once replaced
fn publish(staging: TempDir, output_dir: &Path, parent: &Path) -> Result<(), RenderError> {
    let retired = scratch_dir(parent, ".polyglot-retired-")?;
    let previous = retired.path().join("site");

    let had_previous = output_dir.exists();
    if had_previous {
        fs::rename(output_dir, &previous).map_err(io_error(output_dir))?;
    }

    if let Err(source) = fs::rename(staging.path(), output_dir) {
        if had_previous {
            if let Err(err) = fs::rename(&previous, output_dir) {
                tracing::warn!("Failed to restore {:?}: {}", output_dir, err);
            }
        }
        return Err(RenderError::Io {
            path: output_dir.to_path_buf(),
            source,
        });
    }

    tracing::debug!("Published {:?}", output_dir);
    Ok(())
}

fn scratch_dir(parent: &Path, prefix: &str) -> Result<TempDir, RenderError> {
    Builder::new()
        .prefix(prefix)
        .tempdir_in(parent)
        .map_err(io_error(parent))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> RenderError {
    let path = path.to_path_buf();
    move |source| RenderError::Io { path, source }
}

fn write_file(path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(path, contents).map_err(io_error(path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_core::SiteBuilder;
    use std::fs;

    fn site(root: &Path, with_templates: bool) -> Config {
        let templates = if with_templates {
            "  templates: templates\n"
        } else {
            ""
        };
        let yaml = format!(
            r#"
site: {{ title: "Site Title", description: "Site description", domain: "https://x/" }}
languages: [{{ key: en, locale: en-US }}, {{ key: fr, locale: fr-FR }}]
post_types: [{{ key: blog, archive: blog }}]
paths:
  content: data
  output: dist
{templates}"#
        );
        fs::write(root.join("polyglot.yml"), yaml).unwrap();

        for (rel, body) in [
            ("data/en/home.md", "# Home\n"),
            ("data/en/404.md", "# Not found\n"),
            ("data/en/blog-foo.md", "# Foo\n"),
            ("data/fr/blog-bar.md", "[//]: # \"Original: blog-foo.md\"\n# Bar\n"),
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }

        Config::from_file(root.join("polyglot.yml")).unwrap()
    }

    #[test]
    fn test_write_site() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), true);
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(
            dir.path().join("templates/single.html"),
            "<title>{{ meta_title }}</title>{{ content }}",
        )
        .unwrap();

        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        write_site(&config, &graph).unwrap();

        let out = dir.path().join("dist");
        let foo = fs::read_to_string(out.join("pages/en/blog-foo.html")).unwrap();
        assert!(foo.contains("<title>Foo</title>"));
        assert!(out.join("pages/en/index.html").exists());
        assert!(out.join("pages/en/404.html").exists());
        assert!(out.join("pages/fr/blog-bar.html").exists());

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://x/fr/blog/bar/</loc>"));

        let rules = fs::read_to_string(out.join("pages/fr/.htaccess")).unwrap();
        assert_eq!(rules, "ErrorDocument 404 /pages/fr/404.html\n");
        assert!(out.join(".htaccess").exists());

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("site-graph.json")).unwrap())
                .unwrap();
        assert_eq!(json["pages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_without_templates_skips_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), false);
        let graph = SiteBuilder::new(config.clone()).build().unwrap();

        let files = render_site(&config, &graph).unwrap();
        assert!(files.iter().all(|f| !f.path.ends_with(".html")));
        assert!(files.iter().any(|f| f.path == "sitemap.xml"));
    }

    #[test]
    fn test_template_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), true);
        fs::create_dir_all(dir.path().join("templates")).unwrap();

        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        let err = write_site(&config, &graph).unwrap_err();

        assert!(matches!(err, RenderError::Template(_)));
        assert!(!dir.path().join("dist").exists());
    }

    /// A template linking to translation groups by key, plus the pages it names
    fn with_nav_template(root: &Path) {
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::write(
            root.join("templates/single.html"),
            "<nav><a href=\"{{ urls.page.about_us.fr.url }}\">{{ urls.page.about_us.fr.title }}</a>\
             <a href=\"{{ urls.blog.foo.fr.url }}\">{{ urls.blog.foo.fr.title }}</a></nav>{{ content }}",
        )
        .unwrap();
        fs::write(root.join("data/en/page-about-us.md"), "# About us\n").unwrap();
        fs::write(
            root.join("data/fr/page-a-propos.md"),
            "[//]: # \"Original: page-about-us.md\"\n# A propos\n",
        )
        .unwrap();
    }

    fn leftovers(root: &Path) -> Vec<String> {
        fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".polyglot-"))
            .collect()
    }

    #[test]
    fn test_templates_address_groups_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), true);
        with_nav_template(dir.path());

        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        write_site(&config, &graph).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/pages/en/index.html")).unwrap();
        assert!(html.contains("a-propos"));
        assert!(html.contains(">A propos</a>"));
        assert!(html.contains(">Bar</a>"));
    }

    #[test]
    fn test_rebuild_drops_deleted_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), true);
        with_nav_template(dir.path());
        fs::write(dir.path().join("data/en/blog-old.md"), "# Old\n").unwrap();

        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        write_site(&config, &graph).unwrap();
        let old_page = dir.path().join("dist/pages/en/blog-old.html");
        assert!(old_page.exists());

        fs::remove_file(dir.path().join("data/en/blog-old.md")).unwrap();
        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        write_site(&config, &graph).unwrap();

        assert!(!old_page.exists());
        assert!(dir.path().join("dist/pages/en/blog-foo.html").exists());
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = site(dir.path(), true);
        with_nav_template(dir.path());

        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        write_site(&config, &graph).unwrap();

        fs::remove_file(dir.path().join("templates/single.html")).unwrap();
        let graph = SiteBuilder::new(config.clone()).build().unwrap();
        assert!(write_site(&config, &graph).is_err());

        assert!(dir.path().join("dist/pages/en/blog-foo.html").exists());
        assert!(leftovers(dir.path()).is_empty());
    }
}
