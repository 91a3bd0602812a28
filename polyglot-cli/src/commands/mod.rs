//! CLI command implementations.

pub mod build;
pub mod check;
pub mod graph;

pub use build::build_site;
pub use check::check_site;
pub use graph::print_graph;

use anyhow::{Context, Result};
use polyglot_core::{Config, SiteBuilder, SiteGraph};
use std::path::Path;

/// Load the configuration and resolve the site graph
pub(crate) fn load_graph(config_path: &Path) -> Result<(Config, SiteGraph)> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let builder = SiteBuilder::new(config.clone());
    let graph = builder.build().context("Failed to build site graph")?;
    Ok((config, graph))
}
