//! Site graph export: the resolved record of every page.

use crate::builder::BuildError;
use crate::config::Config;
use crate::models::{ArchiveEntry, ContentItem, GroupKey, MenuEntry, PostKind, RenderedBody};
use crate::selection::{select_chunk, select_template, Catalog, Shape, Target};
use crate::store::ContentStore;
use crate::translations::TranslationIndex;
use crate::urls::UrlResolver;
use polyglot_types::{ItemId, LanguageKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Everything downstream renderers and generators need for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: ItemId,
    pub language: LanguageKey,
    pub language_locale: String,
    pub source: String,
    pub kind: PostKind,
    pub slug: Option<String>,
    pub is_home: bool,
    pub is_archive: bool,
    pub html_output_path: String,
    pub template_id: String,

    /// Content-specific bundle, if one exists
    pub chunk_id: Option<String>,

    /// Bundles to load, specific first, shared last
    pub chunks: Vec<String>,

    pub canonical_url: String,
    pub seo_title: String,
    pub seo_description: String,
    pub translation_menu: Vec<MenuEntry>,
    pub archive_list: Vec<ArchiveEntry>,
    pub content_html: String,
}

/// The not-found page of one language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundRecord {
    pub id: ItemId,
    pub language: LanguageKey,
    pub language_locale: String,
    pub html_output_path: String,
    pub template_id: String,
    pub chunk_id: Option<String>,
    pub chunks: Vec<String>,
    pub seo_title: String,
    pub seo_description: String,
    pub content_html: String,
}

/// Site-relative path of a page with a canonical URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePath {
    pub path: String,
}

/// A translation group as exposed to templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub key: GroupKey,
    pub entries: Vec<MenuEntry>,
}

/// One language's entry in the template url map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLink {
    pub title: String,
    pub url: String,
}

/// Translation groups addressed as `urls.<post_type>.<slug>.<lang>`
///
/// Slugs are the normalized group slugs, so `page-about-us.md` is reached at
/// `urls.page.about_us`. Home lives at `urls.page.home`.
pub type UrlMap = BTreeMap<String, BTreeMap<String, BTreeMap<String, GroupLink>>>;

/// The resolved site graph of one build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteGraph {
    pub pages: Vec<PageRecord>,
    pub not_found: Vec<NotFoundRecord>,
    pub paths: Vec<SitePath>,
    pub groups: Vec<GroupRecord>,
}

impl SiteGraph {
    pub fn find_by_source(&self, language: &str, source: &str) -> Option<&PageRecord> {
        self.pages
            .iter()
            .find(|p| p.language == language && p.source == source)
    }

    pub fn not_found_for(&self, language: &str) -> Option<&NotFoundRecord> {
        self.not_found.iter().find(|p| p.language == language)
    }

    /// Every translation group keyed by post type, slug, then language
    pub fn url_map(&self) -> UrlMap {
        let mut map = UrlMap::new();

        for group in &self.groups {
            let (post_type, slug) = match &group.key {
                GroupKey::Home => ("page", "home"),
                GroupKey::Typed { post_type, slug } => (post_type.as_str(), slug.as_str()),
            };
            let languages = map
                .entry(post_type.to_string())
                .or_default()
                .entry(slug.to_string())
                .or_default();
            if !languages.is_empty() {
                tracing::warn!(
                    "{:?} shares urls.{}.{} with another group",
                    group.key,
                    post_type,
                    slug
                );
                if group.key != GroupKey::Home {
                    continue;
                }
                languages.clear();
            }
            for entry in &group.entries {
                languages.insert(
                    entry.language.to_string(),
                    GroupLink {
                        title: entry.title.clone(),
                        url: entry.url.clone(),
                    },
                );
            }
        }

        map
    }
}

/// Phase-two output for one item
#[derive(Debug, Clone, Default)]
pub struct ResolvedItem {
    pub archives: Vec<ArchiveEntry>,
    pub body: RenderedBody,
}

pub struct SiteGraphExporter<'a, T: ?Sized, B: ?Sized> {
    config: &'a Config,
    templates: &'a T,
    bundles: &'a B,
}

impl<'a, T: Catalog + ?Sized, B: Catalog + ?Sized> SiteGraphExporter<'a, T, B> {
    pub fn new(config: &'a Config, templates: &'a T, bundles: &'a B) -> Self {
        Self {
            config,
            templates,
            bundles,
        }
    }

    /// Assemble the graph; `resolved` is indexed by item id
    pub fn export(
        &self,
        store: &ContentStore,
        resolved: &[ResolvedItem],
        translations: &TranslationIndex,
    ) -> Result<SiteGraph, BuildError> {
        let canonical = UrlResolver::canonical(self.config);
        let mut graph = SiteGraph::default();
        let mut seen_urls = HashSet::new();

        for item in store.items() {
            let resolved = resolved
                .get(item.id.index())
                .ok_or(BuildError::Unresolved(item.id))?;

            if item.is_not_found() {
                graph.not_found.push(self.not_found_record(item, resolved));
                continue;
            }

            let slug = item.slug.as_deref();
            let lang = item.language.as_str();
            let canonical_url = canonical
                .resolve(&item.kind, slug, lang)?
                .unwrap_or_default();
            if !seen_urls.insert(canonical_url.clone()) {
                return Err(BuildError::DuplicateUrl(canonical_url));
            }
            if let Some(path) = canonical.path(&item.kind, slug, lang)? {
                graph.paths.push(SitePath { path });
            }

            let target = target_of(item);
            let template_id = select_template(&target, self.templates);
            let chunk_id = select_chunk(&target, self.bundles);
            tracing::debug!(
                "{:?}: template {}, chunk {:?}",
                item.source_path,
                template_id,
                chunk_id
            );

            let (seo_title, seo_description) = if item.is_home() {
                (
                    self.config.site.title.clone(),
                    self.config.site.description.clone(),
                )
            } else {
                self.seo_from_body(&resolved.body)
            };

            graph.pages.push(PageRecord {
                id: item.id,
                language: item.language.clone(),
                language_locale: self.locale(&item.language),
                source: item.filename.clone(),
                kind: item.kind.clone(),
                slug: item.slug.clone(),
                is_home: item.is_home(),
                is_archive: item.is_archive,
                html_output_path: item.html_output_path(),
                template_id,
                chunks: self.chunks(chunk_id.as_deref()),
                chunk_id,
                canonical_url,
                seo_title,
                seo_description,
                translation_menu: translations
                    .menu_for(item.id, &self.config.languages)
                    .unwrap_or_default(),
                archive_list: resolved.archives.clone(),
                content_html: resolved.body.html.clone(),
            });
        }

        graph.groups = translations
            .groups()
            .iter()
            .map(|group| GroupRecord {
                key: group.key.clone(),
                entries: group.listing(&self.config.languages),
            })
            .collect();

        tracing::info!(
            "Exported {} pages, {} not-found pages, {} paths",
            graph.pages.len(),
            graph.not_found.len(),
            graph.paths.len()
        );

        Ok(graph)
    }

    fn not_found_record(&self, item: &ContentItem, resolved: &ResolvedItem) -> NotFoundRecord {
        let target = target_of(item);
        let chunk_id = select_chunk(&target, self.bundles);
        let (seo_title, seo_description) = self.seo_from_body(&resolved.body);

        NotFoundRecord {
            id: item.id,
            language: item.language.clone(),
            language_locale: self.locale(&item.language),
            html_output_path: item.html_output_path(),
            template_id: select_template(&target, self.templates),
            chunks: self.chunks(chunk_id.as_deref()),
            chunk_id,
            seo_title,
            seo_description,
            content_html: resolved.body.html.clone(),
        }
    }

    fn seo_from_body(&self, body: &RenderedBody) -> (String, String) {
        (
            body.heading
                .clone()
                .unwrap_or_else(|| self.config.site.title.clone()),
            body.paragraph
                .clone()
                .unwrap_or_else(|| self.config.site.description.clone()),
        )
    }

    fn locale(&self, language: &LanguageKey) -> String {
        self.config
            .language(language)
            .map(|l| l.locale.clone())
            .unwrap_or_default()
    }

    fn chunks(&self, chunk_id: Option<&str>) -> Vec<String> {
        chunk_id
            .into_iter()
            .map(str::to_string)
            .chain(std::iter::once(self.config.shared_bundle.clone()))
            .collect()
    }
}

fn target_of(item: &ContentItem) -> Target<'_> {
    let shape = match item.kind {
        PostKind::Home => Shape::Home,
        PostKind::NotFound => Shape::NotFound,
        _ if item.is_archive => Shape::Archive,
        _ => Shape::Single,
    };
    Target {
        shape,
        post_type: item.kind.as_str(),
        slug: item.slug.as_deref(),
    }
}
