//! Archive listings: every item of one post type in one language.

use crate::markdown::MarkdownProcessor;
use crate::models::{ArchiveEntry, ContentItem};
use crate::store::ContentStore;
use crate::urls::{UrlError, UrlResolver};
use polyglot_types::LanguageKey;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("No level-1 heading to title archive entry {0}")]
    MissingHeading(PathBuf),

    #[error(transparent)]
    Url(#[from] UrlError),
}

pub struct ArchiveCollector<'a> {
    store: &'a ContentStore,
    resolver: UrlResolver<'a>,
    processor: &'a MarkdownProcessor,
}

impl<'a> ArchiveCollector<'a> {
    /// `resolver` decides the URL shape of the links (root-relative for pages)
    pub fn new(
        store: &'a ContentStore,
        resolver: UrlResolver<'a>,
        processor: &'a MarkdownProcessor,
    ) -> Self {
        Self {
            store,
            resolver,
            processor,
        }
    }

    /// List every item of `post_type` in `language`, in slug order
    ///
    /// The title of each entry is the first level-1 heading of its raw body;
    /// an entry without one fails the whole listing.
    pub fn collect(
        &self,
        post_type: &str,
        language: &LanguageKey,
    ) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut entries = Vec::new();

        for item in self
            .store
            .in_language(language)
            .filter(|i| is_of_type(i, post_type))
        {
            let title = self
                .processor
                .first_heading(&item.raw_body)
                .ok_or_else(|| ArchiveError::MissingHeading(item.source_path.clone()))?;

            let link = self
                .resolver
                .resolve(&item.kind, item.slug.as_deref(), language.as_str())?
                .unwrap_or_default();

            entries.push(ArchiveEntry { link, title });
        }

        tracing::debug!(
            "Archive {}/{}: {} entries",
            language,
            post_type,
            entries.len()
        );

        Ok(entries)
    }
}

/// Typed items only: Home and NotFound never appear in a listing
fn is_of_type(item: &ContentItem, post_type: &str) -> bool {
    item.slug.is_some() && item.kind.as_str() == post_type
}
