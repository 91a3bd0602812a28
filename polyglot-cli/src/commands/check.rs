//! Resolve the site without writing anything and report what was found.

use super::load_graph;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckSummary {
    pages: usize,
    not_found: usize,
    groups: usize,
    paths: usize,
    untranslated: Vec<String>,
}

/// Every fatal condition surfaces as an error; success means a build would resolve
pub fn check_site(config_path: &Path, json: bool) -> Result<()> {
    let (_, graph) = load_graph(config_path)?;

    let untranslated: Vec<String> = graph
        .pages
        .iter()
        .filter(|p| p.translation_menu.len() < 2)
        .map(|p| p.canonical_url.clone())
        .collect();

    let summary = CheckSummary {
        pages: graph.pages.len(),
        not_found: graph.not_found.len(),
        groups: graph.groups.len(),
        paths: graph.paths.len(),
        untranslated,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Check complete: {} pages, {} not-found pages, {} translation groups, {} paths",
            summary.pages, summary.not_found, summary.groups, summary.paths
        );
        for url in &summary.untranslated {
            println!("  untranslated: {}", url);
        }
    }

    Ok(())
}
