//! # polyglot-core
//!
//! Core library for the polyglot multilingual static site compiler.
//!
//! This crate reads a content tree laid out as one directory per language,
//! classifies every markdown file, and resolves the site graph: canonical
//! URLs, translation groups, template and bundle choices, archive listings
//! and SEO fields for every page.

pub mod archive;
pub mod builder;
pub mod classify;
pub mod config;
pub mod directives;
pub mod export;
pub mod markdown;
pub mod models;
pub mod selection;
pub mod store;
pub mod translations;
pub mod urls;

#[cfg(test)]
mod testing;

pub use archive::ArchiveCollector;
pub use builder::{BuildError, SiteBuilder};
pub use classify::{classify, FileClass};
pub use config::{Config, Language, PostType};
pub use export::{GroupLink, GroupRecord, NotFoundRecord, PageRecord, SiteGraph, SitePath, UrlMap};
pub use models::{
    ArchiveEntry, ContentItem, Directives, GroupKey, MenuEntry, PostKind, RenderedBody,
    TranslationEntry,
};
pub use polyglot_types::{ItemId, LanguageKey};
pub use selection::{Catalog, DirectoryCatalog};
pub use store::ContentStore;
pub use translations::{TranslationGroup, TranslationIndex};
pub use urls::UrlResolver;
