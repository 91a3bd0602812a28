//! Dump the resolved site graph.

use super::load_graph;
use anyhow::Result;
use std::path::Path;

pub fn print_graph(config_path: &Path, pretty: bool) -> Result<()> {
    let (_, graph) = load_graph(config_path)?;

    let payload = if pretty {
        serde_json::to_string_pretty(&graph)?
    } else {
        serde_json::to_string(&graph)?
    };
    println!("{}", payload);
    Ok(())
}
