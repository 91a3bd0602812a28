//! Filename classification.

use crate::config::PostType;
use crate::models::PostKind;

/// What a content file's name says about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClass {
    Home,
    NotFound,
    Typed { type_key: String, slug: String },
    Malformed,
}

/// Classify a file name (extension included or already stripped)
///
/// Rules, first match wins:
/// - `home` is the home page
/// - `404` is the not-found page
/// - `<type>-<slug>` splits at the first hyphen only
/// - anything else is malformed and gets dropped by the caller
///
/// # Examples
///
/// ```
/// use polyglot_core::classify::{classify, FileClass};
///
/// assert_eq!(classify("home.md"), FileClass::Home);
/// assert_eq!(
///     classify("blog-hello-world.md"),
///     FileClass::Typed { type_key: "blog".into(), slug: "hello-world".into() }
/// );
/// assert_eq!(classify("blog.md"), FileClass::Malformed);
/// ```
pub fn classify(file_name: &str) -> FileClass {
    let name = strip_extension(file_name);

    match name {
        "home" => FileClass::Home,
        "404" => FileClass::NotFound,
        _ => match name.split_once('-') {
            Some((type_key, slug)) if !type_key.is_empty() && !slug.is_empty() => {
                FileClass::Typed {
                    type_key: type_key.to_string(),
                    slug: slug.to_string(),
                }
            }
            _ => FileClass::Malformed,
        },
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

impl FileClass {
    /// Post kind and slug, or None for malformed names
    pub fn into_kind(self) -> Option<(PostKind, Option<String>)> {
        match self {
            FileClass::Home => Some((PostKind::Home, None)),
            FileClass::NotFound => Some((PostKind::NotFound, None)),
            FileClass::Typed { type_key, slug } => {
                Some((PostKind::from_type_key(&type_key), Some(slug)))
            }
            FileClass::Malformed => None,
        }
    }
}

/// A page is an archive when its slug is some post type's archive segment
pub fn is_archive(kind: &PostKind, slug: Option<&str>, post_types: &[PostType]) -> bool {
    match (kind, slug) {
        (PostKind::Page, Some(slug)) => post_types.iter().any(|p| p.archive == slug),
        _ => false,
    }
}
