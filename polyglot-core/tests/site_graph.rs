//! End-to-end tests for site graph resolution over a content tree on disk.

use polyglot_core::{Config, GroupKey, SiteBuilder, SiteGraph};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
site:
  title: "Example"
  description: "An example site"
  domain: "https://x/"
languages:
  - { key: en, locale: en-US }
  - { key: fr, locale: fr-FR }
  - { key: de, locale: de-DE }
post_types:
  - { key: blog, archive: blog }
  - { key: event, archive: events }
paths:
  content: data
  output: dist
"#;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn build(root: &Path) -> SiteGraph {
    fs::write(root.join("polyglot.yml"), CONFIG).unwrap();
    let config = Config::from_file(root.join("polyglot.yml")).unwrap();
    SiteBuilder::new(config).build().unwrap()
}

fn sample_tree(root: &Path) {
    write(root, "data/en/home.md", "# Home\n\nWelcome home.\n");
    write(root, "data/en/404.md", "# Not found\n");
    write(root, "data/en/blog-foo.md", "# Foo Post\n");
    write(root, "data/en/blog-hello-world.md", "# Hello\n");
    write(root, "data/en/blog.md", "# No slug\n");
    write(root, "data/en/page-about.md", "# About\n");
    write(
        root,
        "data/en/page-blog.md",
        "# Blog\n\n{% for post in archives %}* [{{ post.title }}]({{ post.link }})\n{% endfor %}",
    );
    write(root, "data/en/event-launch.md", "# Launch\n");
    write(root, "data/fr/home.md", "[//]: # \"Original: home.md\"\n# Accueil\n");
    write(
        root,
        "data/fr/blog-bar.md",
        "[//]: # \"Original: blog-foo.md\"\n\n# Article Bar\n",
    );
    write(root, "data/fr/page-a-propos.md", "[//]: # \"Original: page-about.md\"\n# A propos\n");
    write(root, "data/de/page-about.md", "# Uber uns\n");
    write(root, "data/de/blog-waise.md", "[//]: # \"Original: blog-nope.md\"\n# Waise\n");
}

#[test]
fn canonical_urls_are_unique() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    let mut seen = HashSet::new();
    for page in &graph.pages {
        assert!(seen.insert(page.canonical_url.clone()), "{}", page.canonical_url);
    }
}

#[test]
fn default_language_urls_have_no_prefix() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    for page in &graph.pages {
        let rest = page.canonical_url.strip_prefix("https://x/").unwrap();
        let first_segment = rest.split('/').next().unwrap_or_default();
        if page.language == "en" {
            assert!(!["fr", "de"].contains(&first_segment), "{}", page.canonical_url);
        } else {
            assert_eq!(first_segment, page.language.as_str(), "{}", page.canonical_url);
        }
    }
}

#[test]
fn translation_groups_are_injective() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    for group in &graph.groups {
        let mut languages = HashSet::new();
        for entry in &group.entries {
            assert!(languages.insert(entry.language.clone()), "{:?}", group.key);
        }
    }
}

#[test]
fn translations_merge_by_filename() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    let about = graph
        .groups
        .iter()
        .find(|g| {
            g.key
                == GroupKey::Typed {
                    post_type: "page".into(),
                    slug: "about".into(),
                }
        })
        .unwrap();
    let langs: Vec<_> = about.entries.iter().map(|e| e.language.as_str()).collect();
    assert_eq!(langs, vec!["en", "fr", "de"]);
    assert_eq!(about.entries[1].url, "https://x/fr/a-propos/");

    let home = graph.groups.iter().find(|g| g.key == GroupKey::Home).unwrap();
    assert_eq!(home.entries.len(), 2);

    // Orphaned pointer: the page exists, but no group holds it
    let orphan = graph.find_by_source("de", "blog-waise.md").unwrap();
    assert!(orphan.translation_menu.is_empty());
}

#[test]
fn translation_of_a_later_language_translation_joins_the_group() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    write(dir.path(), "data/en/page-contact.md", "# Contact\n");
    write(
        dir.path(),
        "data/fr/page-joindre.md",
        "[//]: # \"Original: page-kontakt.md\"\n# Nous joindre\n",
    );
    write(
        dir.path(),
        "data/de/page-kontakt.md",
        "[//]: # \"Original: page-contact.md\"\n# Kontakt\n",
    );
    let graph = build(dir.path());

    let contact = graph
        .groups
        .iter()
        .find(|g| {
            g.key
                == GroupKey::Typed {
                    post_type: "page".into(),
                    slug: "contact".into(),
                }
        })
        .unwrap();
    let langs: Vec<_> = contact.entries.iter().map(|e| e.language.as_str()).collect();
    assert_eq!(langs, vec!["en", "fr", "de"]);

    let fr = graph.find_by_source("fr", "page-joindre.md").unwrap();
    assert_eq!(fr.translation_menu.len(), 3);
    assert!(fr.translation_menu[1].is_current);
}

#[test]
fn malformed_names_are_dropped_silently() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    assert!(graph.find_by_source("en", "blog.md").is_none());
    assert!(graph.paths.iter().all(|p| !p.path.contains("no-slug")));
}

#[test]
fn archive_page_lists_its_post_type() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    let archive = graph.find_by_source("en", "page-blog.md").unwrap();
    let titles: Vec<_> = archive.archive_list.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Foo Post", "Hello"]);
    assert!(archive.content_html.contains(r#"<a href="/blog/foo/">Foo Post</a>"#));
    assert!(archive.content_html.contains(r#"<a href="/blog/hello-world/">Hello</a>"#));

    let about = graph.find_by_source("en", "page-about.md").unwrap();
    assert!(about.archive_list.is_empty());
}

#[test]
fn path_list_matches_canonical_urls() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    assert_eq!(graph.paths.len(), graph.pages.len());
    for (page, path) in graph.pages.iter().zip(&graph.paths) {
        assert_eq!(page.canonical_url, format!("https://x/{}", path.path));
    }
    let paths: Vec<_> = graph.paths.iter().map(|p| p.path.as_str()).collect();
    assert!(paths.contains(&"events/launch/"));
    assert!(paths.contains(&"fr/"));
}

#[test]
fn missing_language_directory_aborts() {
    let dir = tempdir().unwrap();
    write(dir.path(), "data/en/home.md", "# Home\n");
    write(dir.path(), "data/fr/home.md", "# Accueil\n");
    fs::write(dir.path().join("polyglot.yml"), CONFIG).unwrap();
    let config = Config::from_file(dir.path().join("polyglot.yml")).unwrap();

    let err = SiteBuilder::new(config).build().unwrap_err();
    assert!(err.to_string().contains("Language directory not found"));
}

#[test]
fn graph_serializes_to_json() {
    let dir = tempdir().unwrap();
    sample_tree(dir.path());
    let graph = build(dir.path());

    let json = serde_json::to_value(&graph).unwrap();
    assert!(json["pages"].as_array().unwrap().len() > 5);
    assert_eq!(json["not_found"][0]["html_output_path"], "pages/en/404.html");
}
