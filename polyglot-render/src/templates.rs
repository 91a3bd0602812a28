//! Page rendering through user templates.
//!
//! Templates live in the configured templates directory and are addressed by
//! id: `<template_id>.<template_extension>`. The engine is used as a black
//! box; pages only supply a context.

use minijinja::{path_loader, Environment, Value};
use polyglot_core::{ArchiveEntry, Config, MenuEntry, NotFoundRecord, PageRecord, UrlMap};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to render template {template}: {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Context handed to every page template
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    // Language
    pub lang: &'a str,
    pub lang_attribute: &'a str,

    // SEO
    pub meta_title: &'a str,
    pub meta_description: &'a str,

    // Content, already converted to HTML
    pub content: Value,
    pub archives: &'a [ArchiveEntry],

    // Site paths
    pub root_path: &'a str,
    pub assets_path: &'a str,

    pub is_home: bool,

    /// Bundles to load, specific first, shared last
    pub chunks: &'a [String],

    /// Every translation group, as `urls.<post_type>.<slug>.<lang>`
    pub urls: &'a UrlMap,

    /// This page's translation menu
    pub current_page_languages: &'a [MenuEntry],
}

impl<'a> PageContext<'a> {
    pub fn for_page(page: &'a PageRecord, config: &'a Config, urls: &'a UrlMap) -> Self {
        Self {
            lang: page.language.as_str(),
            lang_attribute: &page.language_locale,
            meta_title: &page.seo_title,
            meta_description: &page.seo_description,
            content: Value::from_safe_string(page.content_html.clone()),
            archives: &page.archive_list,
            root_path: &config.site.root_path,
            assets_path: &config.site.assets_path,
            is_home: page.is_home,
            chunks: &page.chunks,
            urls,
            current_page_languages: &page.translation_menu,
        }
    }

    pub fn for_not_found(
        page: &'a NotFoundRecord,
        config: &'a Config,
        urls: &'a UrlMap,
    ) -> Self {
        Self {
            lang: page.language.as_str(),
            lang_attribute: &page.language_locale,
            meta_title: &page.seo_title,
            meta_description: &page.seo_description,
            content: Value::from_safe_string(page.content_html.clone()),
            archives: &[],
            root_path: &config.site.root_path,
            assets_path: &config.site.assets_path,
            is_home: false,
            chunks: &page.chunks,
            urls,
            current_page_languages: &[],
        }
    }
}

/// Renders pages with templates loaded from one directory
pub struct PageRenderer {
    env: Environment<'static>,
    extension: String,
}

impl PageRenderer {
    pub fn new(templates_dir: &Path, extension: &str) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(templates_dir));
        Self {
            env,
            extension: extension.to_string(),
        }
    }

    fn template_name(&self, template_id: &str) -> String {
        format!("{}.{}", template_id, self.extension)
    }

    pub fn render(&self, template_id: &str, ctx: &PageContext<'_>) -> Result<String, TemplateError> {
        let name = self.template_name(template_id);
        let render_err = |source: minijinja::Error| TemplateError::Render {
            template: name.clone(),
            source,
        };

        let template = self.env.get_template(&name).map_err(render_err)?;
        template.render(ctx).map_err(render_err)
    }
}
