//! Content store: reads every language directory and holds the item arena.

use crate::classify::{classify, is_archive};
use crate::config::Config;
use crate::directives::parse_directives;
use crate::markdown::{MarkdownProcessor, VariableContext, VariableRenderer};
use crate::models::{ArchiveEntry, ContentItem, PostKind, RenderedBody};
use polyglot_types::{ItemId, LanguageKey};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Language directory not found: {0}")]
    MissingLanguageDir(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list content: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Variable substitution failed in {path}: {source}")]
    Variables {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
}

/// All content items of a build, indexed by `ItemId`
///
/// Items are stored in declared language order, then file name order within
/// a language directory.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: Vec<ContentItem>,
}

impl ContentStore {
    /// Read and classify every content file of every declared language
    pub fn load(config: &Config) -> Result<Self, StoreError> {
        let content_dir = config.content_dir();
        let mut store = Self::default();

        for language in &config.languages {
            let dir = content_dir.join(language.key.as_str());
            if !dir.is_dir() {
                return Err(StoreError::MissingLanguageDir(dir));
            }
            let before = store.items.len();
            store.load_language(config, &language.key, &dir)?;
            tracing::debug!(
                "Loaded {} items for language {}",
                store.items.len() - before,
                language.key
            );
        }

        tracing::info!("Found {} content items", store.items.len());
        Ok(store)
    }

    fn load_language(
        &mut self,
        config: &Config,
        language: &LanguageKey,
        dir: &Path,
    ) -> Result<(), StoreError> {
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let Some((kind, slug)) = classify(filename).into_kind() else {
                tracing::debug!("Skipping malformed file name {:?}", path);
                continue;
            };

            let raw_body = fs::read_to_string(path).map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            self.items.push(ContentItem {
                id: ItemId::from(self.items.len()),
                language: language.clone(),
                filename: filename.to_string(),
                is_archive: is_archive(&kind, slug.as_deref(), &config.post_types),
                kind,
                slug,
                directives: parse_directives(&raw_body),
                raw_body,
                source_path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    pub fn get(&self, id: ItemId) -> Option<&ContentItem> {
        self.items.get(id.index())
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one language, in store order
    pub fn in_language<'a>(
        &'a self,
        language: &'a LanguageKey,
    ) -> impl Iterator<Item = &'a ContentItem> + 'a {
        self.items.iter().filter(move |i| &i.language == language)
    }

    /// First item (in store order) whose source file name is `filename`
    pub fn find_by_filename(&self, filename: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.filename == filename)
    }

    /// Two-stage body rendering: variable substitution, then markdown conversion
    pub fn render(
        &self,
        item: &ContentItem,
        archives: &[ArchiveEntry],
        config: &Config,
        variables: &VariableRenderer,
        processor: &MarkdownProcessor,
    ) -> Result<RenderedBody, StoreError> {
        let substituted = variables
            .render(
                &item.raw_body,
                VariableContext {
                    archives,
                    assets_path: &config.site.assets_path,
                    root_path: &config.site.root_path,
                    lang: item.language.as_str(),
                },
            )
            .map_err(|source| StoreError::Variables {
                path: item.source_path.clone(),
                source,
            })?;

        Ok(processor.convert(&substituted))
    }
}

/// Post type listed by an archive page, if the item is one
pub fn archived_post_type<'a>(item: &ContentItem, config: &'a Config) -> Option<&'a str> {
    if !item.is_archive || item.kind != PostKind::Page {
        return None;
    }
    item.slug
        .as_deref()
        .and_then(|slug| config.post_type_for_archive(slug))
        .map(|p| p.key.as_str())
}
