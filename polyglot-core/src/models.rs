//! Content model structs for items, archives and translations.

use polyglot_types::{ItemId, LanguageKey};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Post type of a content item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Home,
    NotFound,
    Page,
    Custom(String),
}

impl PostKind {
    /// Build a kind from a filename type key ("page" or a custom key)
    pub fn from_type_key(key: &str) -> Self {
        match key {
            "page" => PostKind::Page,
            other => PostKind::Custom(other.to_string()),
        }
    }

    /// Key used in template ids (`single-<key>`) and translation groups
    pub fn as_str(&self) -> &str {
        match self {
            PostKind::Home => "home",
            PostKind::NotFound => "404",
            PostKind::Page => "page",
            PostKind::Custom(key) => key,
        }
    }
}

/// Directives embedded as hidden markdown comments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directives {
    /// `Title:` directive, preferred over the first heading
    pub title: Option<String>,

    /// `Original:` directive, the source filename this item translates
    pub original: Option<String>,
}

/// One source file, one output page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub language: LanguageKey,

    /// File name including extension (e.g. "blog-foo.md"); translation lookup key
    pub filename: String,

    pub kind: PostKind,

    /// Present iff kind is neither Home nor NotFound
    pub slug: Option<String>,

    /// Page whose slug is some post type's archive segment
    pub is_archive: bool,

    pub directives: Directives,

    pub raw_body: String,

    pub source_path: PathBuf,
}

impl ContentItem {
    pub fn is_home(&self) -> bool {
        self.kind == PostKind::Home
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == PostKind::NotFound
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.filename)
    }

    /// Output path relative to the output directory
    pub fn html_output_path(&self) -> String {
        let file = match self.kind {
            PostKind::Home => "index",
            PostKind::NotFound => "404",
            _ => self.stem(),
        };
        format!("pages/{}/{}.html", self.language, file)
    }
}

/// Body of an item after variable substitution and markdown conversion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedBody {
    pub html: String,

    /// Text of the first level-1 heading of the rendered output
    pub heading: Option<String>,

    /// Plain text of the first paragraph of the rendered output
    pub paragraph: Option<String>,
}

/// A derived `{link, title}` pair listing one item on an archive page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub link: String,
    pub title: String,
}

/// One language's slot in a translation group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub item: ItemId,
    pub title: String,
    pub url: String,
}

/// Key of a translation group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Home,
    Typed {
        post_type: String,
        slug: String,
    },
}

impl GroupKey {
    pub fn typed(kind: &PostKind, slug: &str) -> Self {
        GroupKey::Typed {
            post_type: kind.as_str().to_string(),
            slug: normalize_group_slug(slug),
        }
    }
}

/// Lowercase a slug and turn dashes into underscores
pub fn normalize_group_slug(slug: &str) -> String {
    slug.to_lowercase().replace('-', "_")
}

/// A translation menu line as seen while rendering one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub language: LanguageKey,
    pub title: String,
    pub url: String,
    pub is_current: bool,
}
