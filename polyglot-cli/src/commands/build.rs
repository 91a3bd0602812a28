//! Build command implementation.

use super::load_graph;
use anyhow::{Context, Result};
use std::path::Path;

/// Resolve the site graph and write the built site
pub fn build_site(config_path: &Path) -> Result<()> {
    let (config, graph) = load_graph(config_path)?;
    tracing::info!("Building site: {}", config.site.title);

    let written = polyglot_render::write_site(&config, &graph).context("Failed to write site")?;

    tracing::info!("✓ Built {} pages", graph.pages.len());
    tracing::info!("✓ {} files written to {:?}", written, config.output_dir());
    Ok(())
}
