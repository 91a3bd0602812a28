//! Canonical URL resolution.

use crate::config::{Config, PostType};
use crate::models::PostKind;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlError {
    #[error("Unknown post type: {0}")]
    UnknownPostType(String),

    #[error("Missing slug for {0} item")]
    MissingSlug(String),
}

/// Site-relative path of an item (no base, no leading slash)
///
/// Returns `Ok(None)` for the not-found page, which has no URL.
pub fn resolve_path(
    kind: &PostKind,
    slug: Option<&str>,
    language: &str,
    is_default_language: bool,
    post_types: &[PostType],
) -> Result<Option<String>, UrlError> {
    let prefix = if is_default_language {
        String::new()
    } else {
        format!("{}/", language)
    };

    let path = match kind {
        PostKind::NotFound => return Ok(None),
        PostKind::Home => prefix,
        PostKind::Page => {
            let slug = slug.ok_or_else(|| UrlError::MissingSlug(kind.as_str().to_string()))?;
            format!("{}{}/", prefix, slug)
        }
        PostKind::Custom(key) => {
            let slug = slug.ok_or_else(|| UrlError::MissingSlug(key.clone()))?;
            let post_type = post_types
                .iter()
                .find(|p| &p.key == key)
                .ok_or_else(|| UrlError::UnknownPostType(key.clone()))?;
            format!("{}{}/{}/", prefix, post_type.archive, slug)
        }
    };

    Ok(Some(path))
}

/// Resolve `base + path` for an item
///
/// # Examples
///
/// ```
/// use polyglot_core::models::PostKind;
/// use polyglot_core::urls::resolve;
///
/// let url = resolve("https://x/", &PostKind::Page, Some("about"), "fr", false, &[]).unwrap();
/// assert_eq!(url.as_deref(), Some("https://x/fr/about/"));
/// ```
pub fn resolve(
    base: &str,
    kind: &PostKind,
    slug: Option<&str>,
    language: &str,
    is_default_language: bool,
    post_types: &[PostType],
) -> Result<Option<String>, UrlError> {
    Ok(resolve_path(kind, slug, language, is_default_language, post_types)?
        .map(|path| format!("{}{}", base, path)))
}

/// URL resolver bound to a base and the site's languages and post types
#[derive(Debug, Clone)]
pub struct UrlResolver<'a> {
    base: &'a str,
    default_language: &'a str,
    post_types: &'a [PostType],
}

impl<'a> UrlResolver<'a> {
    /// Absolute URLs, based on the configured domain
    pub fn canonical(config: &'a Config) -> Self {
        Self::with_base(config, &config.site.domain)
    }

    /// Root-relative URLs, based on the configured root path
    pub fn root_relative(config: &'a Config) -> Self {
        Self::with_base(config, &config.site.root_path)
    }

    fn with_base(config: &'a Config, base: &'a str) -> Self {
        Self {
            base,
            default_language: config.default_language().map_or("", |l| l.key.as_str()),
            post_types: &config.post_types,
        }
    }

    pub fn is_default_language(&self, language: &str) -> bool {
        language == self.default_language
    }

    pub fn resolve(
        &self,
        kind: &PostKind,
        slug: Option<&str>,
        language: &str,
    ) -> Result<Option<String>, UrlError> {
        resolve(
            self.base,
            kind,
            slug,
            language,
            self.is_default_language(language),
            self.post_types,
        )
    }

    /// Path relative to the base, as listed for sitemap and rewrite generation
    pub fn path(
        &self,
        kind: &PostKind,
        slug: Option<&str>,
        language: &str,
    ) -> Result<Option<String>, UrlError> {
        resolve_path(
            kind,
            slug,
            language,
            self.is_default_language(language),
            self.post_types,
        )
    }
}
