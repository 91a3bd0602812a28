//! Configuration parsing and management.

use polyglot_types::LanguageKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Duplicate language key: {0}")]
    DuplicateLanguage(String),

    #[error("Duplicate post type key: {0}")]
    DuplicatePostType(String),
}

/// Main configuration struct matching the polyglot.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    /// Declared languages; the first entry is the default language
    pub languages: Vec<Language>,

    /// Declared post types, in declaration order
    #[serde(default)]
    pub post_types: Vec<PostType>,

    pub paths: PathsConfig,

    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    #[serde(default = "default_bundle_extension")]
    pub bundle_extension: String,

    /// Bundle referenced by every page, after the content-specific one
    #[serde(default = "default_shared_bundle")]
    pub shared_bundle: String,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_template_extension() -> String {
    String::from("html")
}

fn default_bundle_extension() -> String {
    String::from("js")
}

fn default_shared_bundle() -> String {
    String::from("global")
}

fn default_root_path() -> String {
    String::from("/")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,

    /// Absolute base of canonical URLs (e.g. "https://example.com/")
    pub domain: String,

    /// Root-relative base of the site (e.g. "/" or "/site/")
    #[serde(default = "default_root_path")]
    pub root_path: String,

    #[serde(default)]
    pub assets_path: String,
}

/// A declared language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub key: LanguageKey,

    /// Value of the html `lang` attribute (e.g. "en-US")
    pub locale: String,
}

/// A declared post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostType {
    pub key: String,

    /// URL segment used for the type's listing page and its individual pages
    pub archive: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Content root; one sub-directory per language
    pub content: PathBuf,
    pub output: PathBuf,

    #[serde(default)]
    pub templates: Option<PathBuf>,

    #[serde(default)]
    pub bundles: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(contents)?;
        config.site.domain = normalize_domain(&config.site.domain);
        config.site.root_path = normalize_base_url(&config.site.root_path);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::MissingField("languages".to_string()));
        }
        if self.site.domain.is_empty() {
            return Err(ConfigError::MissingField("site.domain".to_string()));
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            if !seen.insert(language.key.as_str()) {
                return Err(ConfigError::DuplicateLanguage(language.key.to_string()));
            }
        }

        let mut seen = HashSet::new();
        for post_type in &self.post_types {
            if !seen.insert(post_type.key.as_str()) {
                return Err(ConfigError::DuplicatePostType(post_type.key.clone()));
            }
        }

        Ok(())
    }

    /// The default language (first declared)
    pub fn default_language(&self) -> Option<&Language> {
        self.languages.first()
    }

    pub fn is_default_language(&self, key: &LanguageKey) -> bool {
        self.languages.first().is_some_and(|l| &l.key == key)
    }

    pub fn language(&self, key: &LanguageKey) -> Option<&Language> {
        self.languages.iter().find(|l| &l.key == key)
    }

    /// Post type whose archive segment equals `segment`, first declared wins
    pub fn post_type_for_archive(&self, segment: &str) -> Option<&PostType> {
        self.post_types.iter().find(|p| p.archive == segment)
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the templates directory, if configured
    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.paths.templates.as_ref().map(|p| self.resolve_path(p))
    }

    /// Get the build bundles directory, if configured
    pub fn bundles_dir(&self) -> Option<PathBuf> {
        self.paths.bundles.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}

/// Ensure the domain ends with a single trailing slash
pub fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    if raw.is_empty() {
        return "/".to_string();
    }

    let mut s = raw.trim().to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
site:
  title: "My Site"
  description: "A test site"
  domain: "https://example.com"
  root_path: "site"
languages:
  - { key: en, locale: en-US }
  - { key: fr, locale: fr-FR }
post_types:
  - { key: page, archive: pages }
  - { key: blog, archive: journal }
paths:
  content: data
  output: dist
"#;

    #[test]
    fn test_default_values() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.template_extension, "html");
        assert_eq!(config.bundle_extension, "js");
        assert_eq!(config.shared_bundle, "global");
        assert_eq!(config.site.assets_path, "");
        assert!(config.templates_dir().is_none());
    }

    #[test]
    fn test_normalizes_domain_and_root_path() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.site.domain, "https://example.com/");
        assert_eq!(config.site.root_path, "/site/");
    }

    #[test]
    fn test_language_order_is_declaration_order() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.default_language().map(|l| l.key.as_str()), Some("en"));
        assert!(config.is_default_language(&LanguageKey::from("en")));
        assert!(!config.is_default_language(&LanguageKey::from("fr")));
        assert_eq!(
            config.language(&LanguageKey::from("fr")).map(|l| l.locale.as_str()),
            Some("fr-FR")
        );
    }

    #[test]
    fn test_unvalidated_config_has_no_default_language() {
        let config: Config = serde_yaml::from_str(
            r#"
site: { title: T, description: D, domain: "https://x/" }
languages: []
paths: { content: data, output: dist }
"#,
        )
        .unwrap();

        assert!(config.default_language().is_none());
        assert!(!config.is_default_language(&LanguageKey::from("en")));
    }

    #[test]
    fn test_post_type_lookup() {
        let config = Config::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.post_type_for_archive("journal").unwrap().key, "blog");
        assert!(config.post_type_for_archive("blog").is_none());
    }

    #[test]
    fn test_rejects_duplicate_languages() {
        let yaml = SAMPLE.replace("{ key: fr, locale: fr-FR }", "{ key: en, locale: en-GB }");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLanguage(key) if key == "en"));
    }

    #[test]
    fn test_rejects_empty_languages() {
        let yaml = r#"
site: { title: T, description: D, domain: "https://x" }
languages: []
paths: { content: data, output: dist }
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(field) if field == "languages"));
    }

    #[test]
    fn test_relative_paths_resolve_against_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polyglot.yml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.content_dir(), dir.path().join("data"));
        assert_eq!(config.output_dir(), dir.path().join("dist"));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("//blog//"), "/blog/");
    }
}
