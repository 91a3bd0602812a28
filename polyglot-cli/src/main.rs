//! # polyglot CLI
//!
//! Command-line interface for the polyglot multilingual static site compiler.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polyglot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "polyglot.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site
    Build,

    /// Print the resolved site graph as JSON
    Graph {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Resolve the site graph without writing output
    Check {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `graph` output stays machine readable
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build => commands::build_site(&cli.config),
        Commands::Graph { pretty } => commands::print_graph(&cli.config, pretty),
        Commands::Check { json } => commands::check_site(&cli.config, json),
    }
}
