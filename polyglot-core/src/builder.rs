//! Site building logic - runs the parse phase, then the resolve phase.

use crate::{
    archive::{ArchiveCollector, ArchiveError},
    config::Config,
    export::{ResolvedItem, SiteGraph, SiteGraphExporter},
    markdown::{MarkdownProcessor, VariableRenderer},
    selection::DirectoryCatalog,
    store::{archived_post_type, ContentStore, StoreError},
    translations::{TranslationError, TranslationIndex},
    urls::{UrlError, UrlResolver},
};
use polyglot_types::ItemId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Failed to scan {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate canonical URL: {0}")]
    DuplicateUrl(String),

    #[error("Item {0} was never resolved")]
    Unresolved(ItemId),
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
    variables: VariableRenderer,
    templates: Option<DirectoryCatalog>,
    bundles: Option<DirectoryCatalog>,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            processor: MarkdownProcessor::new(),
            variables: VariableRenderer::new(),
            templates: None,
            bundles: None,
        }
    }

    /// Use fixed template and bundle catalogs instead of scanning directories
    pub fn with_catalogs(mut self, templates: DirectoryCatalog, bundles: DirectoryCatalog) -> Self {
        self.templates = Some(templates);
        self.bundles = Some(bundles);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the site graph
    ///
    /// Nothing is written; the graph is complete or the build fails.
    pub fn build(&self) -> Result<SiteGraph, BuildError> {
        // Phase 1: parse every language; no cross-item knowledge
        let store = ContentStore::load(&self.config)?;

        // Phase 2: everything below needs the complete arena
        let templates = match &self.templates {
            Some(catalog) => catalog.clone(),
            None => scan_catalog(self.config.templates_dir(), &self.config.template_extension)?,
        };
        let bundles = match &self.bundles {
            Some(catalog) => catalog.clone(),
            None => scan_catalog(self.config.bundles_dir(), &self.config.bundle_extension)?,
        };

        let translations = TranslationIndex::build(
            &store,
            &self.config,
            &UrlResolver::canonical(&self.config),
            &self.processor,
        )?;

        let resolved = self.resolve_items(&store)?;

        let exporter = SiteGraphExporter::new(&self.config, &templates, &bundles);
        let graph = exporter.export(&store, &resolved, &translations)?;

        tracing::info!("Built site graph with {} pages", graph.pages.len());
        Ok(graph)
    }

    /// Archives and rendered bodies, indexed by item id
    fn resolve_items(&self, store: &ContentStore) -> Result<Vec<ResolvedItem>, BuildError> {
        let collector = ArchiveCollector::new(
            store,
            UrlResolver::root_relative(&self.config),
            &self.processor,
        );

        let mut resolved = Vec::with_capacity(store.len());
        for item in store.items() {
            let archives = match archived_post_type(item, &self.config) {
                Some(post_type) => collector.collect(post_type, &item.language)?,
                None => Vec::new(),
            };
            let body = store.render(
                item,
                &archives,
                &self.config,
                &self.variables,
                &self.processor,
            )?;
            resolved.push(ResolvedItem { archives, body });
        }

        Ok(resolved)
    }
}

fn scan_catalog(dir: Option<PathBuf>, extension: &str) -> Result<DirectoryCatalog, BuildError> {
    match dir {
        Some(path) => DirectoryCatalog::scan(&path, extension)
            .map_err(|source| BuildError::Catalog { path, source }),
        None => Ok(DirectoryCatalog::default()),
    }
}
