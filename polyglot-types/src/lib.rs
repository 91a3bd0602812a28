//! Shared types for polyglot
//!
//! This crate provides the identifiers used across the polyglot crates:
//! arena ids for content items and language keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content item identifier
///
/// Assigned once at parse time as the item's index in the content arena.
/// Phase-two lookups go through this id, never through object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ItemId {
    fn from(index: usize) -> Self {
        ItemId(index as u32)
    }
}

impl From<ItemId> for usize {
    fn from(id: ItemId) -> Self {
        id.index()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Language key (e.g. "en", "fr"), also the name of the language's content directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageKey(pub String);

impl LanguageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageKey {
    fn from(key: &str) -> Self {
        LanguageKey(key.to_string())
    }
}

impl PartialEq<str> for LanguageKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
