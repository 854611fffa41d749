// src/lib.rs

pub mod cli;
pub mod commands;
pub mod config;
pub mod dag;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod model;
pub mod render;
pub mod schedule;
pub mod storage;
pub mod views;

use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::commands::Outcome;
use crate::config::ConfigFile;
use crate::config::loader::{load_effective, resolve_graph_path};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::storage::GraphStore;

/// High-level entry point used by `main.rs`.
///
/// Loads the config, opens the graph file, runs one command against it and
/// prints the result. The graph is saved only when the command changed it.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_effective(args.config.as_deref())?;
    let path = resolve_graph_path(args.graph.as_deref(), &cfg);
    debug!(graph = %path.display(), "resolved graph file");

    let store = GraphStore::open(path);
    let outcome = run_with_store(&args.command, &store, &cfg)?;
    print!("{}", outcome.output);
    Ok(())
}

/// Load, execute, save-if-modified against an arbitrary store.
pub fn run_with_store<F: FileSystem>(
    cmd: &Command,
    store: &GraphStore<F>,
    cfg: &ConfigFile,
) -> Result<Outcome> {
    let mut graph = store.load()?;
    let outcome = commands::execute(cmd, &mut graph, cfg)?;
    if outcome.modified {
        store.save(&graph)?;
    }
    Ok(outcome)
}
