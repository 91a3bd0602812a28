//! Fixtures shared by unit tests.

use crate::config::Config;
use std::fs;
use std::path::Path;

pub const SAMPLE_CONFIG: &str = r#"
site:
  title: "Site Title"
  description: "Site description"
  domain: "https://x/"
  root_path: "/"
  assets_path: "/public/"
languages:
  - { key: en, locale: en-US }
  - { key: fr, locale: fr-FR }
post_types:
  - { key: blog, archive: blog }
paths:
  content: data
  templates: templates
  bundles: scripts
  output: dist
"#;

/// Write `polyglot.yml` into `root` and load it
pub fn sample_config(root: &Path) -> Config {
    let path = root.join("polyglot.yml");
    fs::write(&path, SAMPLE_CONFIG).unwrap();
    Config::from_file(&path).unwrap()
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
