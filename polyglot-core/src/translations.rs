//! Translation groups: one logical page across languages.
//!
//! Built in two passes over the complete item arena. Pass A opens a group for
//! every item that is not itself a translation; pass B files each translation
//! into the group of the item its `Original:` directive names.

use crate::config::{Config, Language};
use crate::markdown::MarkdownProcessor;
use crate::models::{ContentItem, GroupKey, MenuEntry, PostKind, TranslationEntry};
use crate::store::ContentStore;
use crate::urls::{UrlError, UrlResolver};
use polyglot_types::{ItemId, LanguageKey};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("No title directive or level-1 heading in {0}")]
    MissingTitle(PathBuf),

    #[error(transparent)]
    Url(#[from] UrlError),
}

/// At most one entry per language
#[derive(Debug, Clone)]
pub struct TranslationGroup {
    pub key: GroupKey,
    entries: Vec<(LanguageKey, TranslationEntry)>,
}

impl TranslationGroup {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            entries: Vec::new(),
        }
    }

    /// Insert a language's entry; refuses a language that already has one
    fn insert(&mut self, language: LanguageKey, entry: TranslationEntry) -> bool {
        if self.get(&language).is_some() {
            return false;
        }
        self.entries.push((language, entry));
        true
    }

    pub fn get(&self, language: &LanguageKey) -> Option<&TranslationEntry> {
        self.entries
            .iter()
            .find(|(l, _)| l == language)
            .map(|(_, e)| e)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&LanguageKey, &TranslationEntry)> {
        self.entries.iter().map(|(l, e)| (l, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The group as seen while rendering `current`, in declared language order
    pub fn menu(&self, current: ItemId, languages: &[Language]) -> Vec<MenuEntry> {
        self.view(Some(current), languages)
    }

    /// The group with no entry marked current, in declared language order
    pub fn listing(&self, languages: &[Language]) -> Vec<MenuEntry> {
        self.view(None, languages)
    }

    fn view(&self, current: Option<ItemId>, languages: &[Language]) -> Vec<MenuEntry> {
        languages
            .iter()
            .filter_map(|language| {
                self.get(&language.key).map(|entry| MenuEntry {
                    language: language.key.clone(),
                    title: entry.title.clone(),
                    url: entry.url.clone(),
                    is_current: Some(entry.item) == current,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranslationIndex {
    groups: Vec<TranslationGroup>,
    by_key: HashMap<GroupKey, usize>,
    membership: HashMap<ItemId, usize>,
}

impl TranslationIndex {
    pub fn build(
        store: &ContentStore,
        config: &Config,
        resolver: &UrlResolver<'_>,
        processor: &MarkdownProcessor,
    ) -> Result<Self, TranslationError> {
        let mut index = Self::default();

        // Pass A: originals
        for item in store.items() {
            if item.is_not_found() || item.directives.original.is_some() {
                continue;
            }
            let key = match (&item.kind, item.slug.as_deref()) {
                (PostKind::Home, _) => GroupKey::Home,
                (kind, Some(slug)) => GroupKey::typed(kind, slug),
                (_, None) => continue,
            };
            let entry = menu_entry(item, config, resolver, processor)?;
            let slot = index.group_slot(key);
            index.file(slot, item, entry);
        }

        // Pass B: translations, by source file name, following chains of
        // translations back to their original
        for item in store.items() {
            if item.is_not_found() {
                continue;
            }
            let Some(original) = item.directives.original.as_deref() else {
                continue;
            };
            let Some(slot) = chain_root(store, original)
                .and_then(|root| index.membership.get(&root.id).copied())
            else {
                tracing::debug!(
                    "{:?} translates {}, which has no group; omitting",
                    item.source_path,
                    original
                );
                continue;
            };
            let entry = menu_entry(item, config, resolver, processor)?;
            index.file(slot, item, entry);
        }

        tracing::info!("Built {} translation groups", index.groups.len());
        Ok(index)
    }

    fn group_slot(&mut self, key: GroupKey) -> usize {
        if let Some(&slot) = self.by_key.get(&key) {
            return slot;
        }
        let slot = self.groups.len();
        self.groups.push(TranslationGroup::new(key.clone()));
        self.by_key.insert(key, slot);
        slot
    }

    fn file(&mut self, slot: usize, item: &ContentItem, entry: TranslationEntry) {
        if self.groups[slot].insert(item.language.clone(), entry) {
            self.membership.insert(item.id, slot);
        } else {
            tracing::warn!(
                "Translation group {:?} already has a {} entry; ignoring {:?}",
                self.groups[slot].key,
                item.language,
                item.source_path
            );
        }
    }

    /// The group an item belongs to, if any
    pub fn group_of(&self, item: ItemId) -> Option<&TranslationGroup> {
        self.membership.get(&item).map(|&slot| &self.groups[slot])
    }

    pub fn group(&self, key: &GroupKey) -> Option<&TranslationGroup> {
        self.by_key.get(key).map(|&slot| &self.groups[slot])
    }

    pub fn groups(&self) -> &[TranslationGroup] {
        &self.groups
    }

    /// Translation menu for rendering `item`, with `is_current` set on its own entry
    pub fn menu_for(&self, item: ItemId, languages: &[Language]) -> Option<Vec<MenuEntry>> {
        self.group_of(item).map(|group| group.menu(item, languages))
    }
}

/// Follow `Original:` pointers from `filename` to the item that opened a group
///
/// A translation may name another translation; the chain ends at the first
/// item without a pointer. Dangling or cyclic chains yield `None`.
fn chain_root<'a>(store: &'a ContentStore, filename: &str) -> Option<&'a ContentItem> {
    let mut current = store.find_by_filename(filename)?;
    for _ in 0..store.len() {
        match current.directives.original.as_deref() {
            None => return Some(current),
            Some(next) => current = store.find_by_filename(next)?,
        }
    }
    None
}

fn menu_entry(
    item: &ContentItem,
    config: &Config,
    resolver: &UrlResolver<'_>,
    processor: &MarkdownProcessor,
) -> Result<TranslationEntry, TranslationError> {
    let title = item
        .directives
        .title
        .clone()
        .or_else(|| processor.first_heading(&item.raw_body));

    let title = match title {
        Some(title) => title,
        None if item.is_home() => config.site.title.clone(),
        None => return Err(TranslationError::MissingTitle(item.source_path.clone())),
    };

    let url = resolver
        .resolve(&item.kind, item.slug.as_deref(), item.language.as_str())?
        .unwrap_or_default();

    Ok(TranslationEntry {
        item: item.id,
        title,
        url,
    })
}
