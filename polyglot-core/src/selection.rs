//! Template and bundle selection.
//!
//! Both selections walk an ordered rule table top-down. A rule applies when
//! its shape matches the item; the first applicable candidate that exists in
//! the catalog wins, and a rule marked as fallback wins unconditionally.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Shape of an item as far as selection is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Home,
    NotFound,
    Archive,
    Single,
}

/// A candidate id, possibly derived from the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Fixed(&'static str),
    /// `archive-<slug>`
    ArchiveSlug,
    /// `single-<post type>`
    SingleType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub shape: Shape,
    pub candidate: Candidate,
    pub fallback: bool,
}

const fn rule(shape: Shape, candidate: Candidate) -> Rule {
    Rule {
        shape,
        candidate,
        fallback: false,
    }
}

const fn fallback(shape: Shape, candidate: Candidate) -> Rule {
    Rule {
        shape,
        candidate,
        fallback: true,
    }
}

pub const TEMPLATE_RULES: &[Rule] = &[
    rule(Shape::Home, Candidate::Fixed("home")),
    rule(Shape::Home, Candidate::SingleType),
    fallback(Shape::Home, Candidate::Fixed("single")),
    rule(Shape::Archive, Candidate::ArchiveSlug),
    fallback(Shape::Archive, Candidate::Fixed("archive")),
    rule(Shape::NotFound, Candidate::Fixed("404")),
    fallback(Shape::NotFound, Candidate::Fixed("single")),
    rule(Shape::Single, Candidate::SingleType),
    fallback(Shape::Single, Candidate::Fixed("single")),
];

/// At most one content-specific bundle per page; no fallback
pub const CHUNK_RULES: &[Rule] = &[
    rule(Shape::Home, Candidate::Fixed("home")),
    rule(Shape::Archive, Candidate::ArchiveSlug),
    rule(Shape::Archive, Candidate::Fixed("archive")),
    rule(Shape::NotFound, Candidate::Fixed("404")),
    rule(Shape::NotFound, Candidate::Fixed("single")),
    rule(Shape::Single, Candidate::SingleType),
    rule(Shape::Single, Candidate::Fixed("single")),
];

/// The item being matched against a rule table
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub shape: Shape,
    pub post_type: &'a str,
    pub slug: Option<&'a str>,
}

impl Target<'_> {
    fn candidate_id(&self, candidate: Candidate) -> Option<String> {
        match candidate {
            Candidate::Fixed(id) => Some(id.to_string()),
            Candidate::ArchiveSlug => self.slug.map(|slug| format!("archive-{}", slug)),
            Candidate::SingleType => Some(format!("single-{}", self.post_type)),
        }
    }
}

/// Set of ids known to exist (templates or build bundles)
pub trait Catalog {
    fn contains(&self, id: &str) -> bool;
}

impl Catalog for [&str] {
    fn contains(&self, id: &str) -> bool {
        self.iter().any(|candidate| *candidate == id)
    }
}

/// Ids of the files with a given extension in a directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryCatalog {
    ids: BTreeSet<String>,
}

impl DirectoryCatalog {
    /// Scan a directory; a missing directory yields an empty catalog
    pub fn scan(dir: &Path, extension: &str) -> io::Result<Self> {
        let mut ids = BTreeSet::new();
        if !dir.is_dir() {
            tracing::debug!("Catalog directory {:?} not found; using empty catalog", dir);
            return Ok(Self { ids });
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.insert(stem.to_string());
            }
        }

        Ok(Self { ids })
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Catalog for DirectoryCatalog {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// Evaluate a rule table top-down
pub fn select<C: Catalog + ?Sized>(rules: &[Rule], target: &Target<'_>, catalog: &C) -> Option<String> {
    rules
        .iter()
        .filter(|r| r.shape == target.shape)
        .filter_map(|r| target.candidate_id(r.candidate).map(|id| (r, id)))
        .find(|(r, id)| r.fallback || catalog.contains(id))
        .map(|(_, id)| id)
}

/// Template id for an item; every shape ends in a fallback
pub fn select_template<C: Catalog + ?Sized>(target: &Target<'_>, catalog: &C) -> String {
    select(TEMPLATE_RULES, target, catalog).unwrap_or_else(|| "single".to_string())
}

/// Content-specific bundle for an item, if any exists
pub fn select_chunk<C: Catalog + ?Sized>(target: &Target<'_>, catalog: &C) -> Option<String> {
    select(CHUNK_RULES, target, catalog)
}
