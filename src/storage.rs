// src/storage.rs

//! Saving and loading a graph as a single JSON file.
//!
//! The file holds every node (id, creation sequence, kind, attributes,
//! timeline) and every edge (from, to, kind). Loading rebuilds the graph
//! in bulk and validates it once; cycles or dangling references fail the load
//! instead of being repaired.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dag::{Edge, ProjectGraph};
use crate::errors::{ProjdagError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::model::Node;

/// Version written into every graph file.
pub const FORMAT_VERSION: u32 = 1;

/// Serialized form of a [`ProjectGraph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphFile {
    pub version: u32,
    pub next_seq: u64,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphFile {
    /// Nodes in creation order, edges in (source, target, kind) order.
    pub fn from_graph(graph: &ProjectGraph) -> Self {
        Self {
            version: FORMAT_VERSION,
            next_seq: graph.next_seq(),
            nodes: graph.nodes().into_iter().cloned().collect(),
            edges: graph.edges(),
        }
    }

    pub fn into_graph(self) -> Result<ProjectGraph> {
        if self.version != FORMAT_VERSION {
            return Err(ProjdagError::MalformedGraph(format!(
                "unsupported graph file version {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        ProjectGraph::from_parts(self.nodes, self.edges, self.next_seq)
    }
}

pub fn to_json(graph: &ProjectGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&GraphFile::from_graph(graph))?)
}

pub fn from_json(json: &str) -> Result<ProjectGraph> {
    let file: GraphFile = serde_json::from_str(json)?;
    file.into_graph()
}

/// A graph file at an explicit path, accessed through a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct GraphStore<F: FileSystem = RealFileSystem> {
    fs: F,
    path: PathBuf,
}

impl GraphStore<RealFileSystem> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(RealFileSystem, path)
    }
}

impl<F: FileSystem> GraphStore<F> {
    pub fn with_fs(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the graph. A file that does not exist yet is an empty graph.
    pub fn load(&self) -> Result<ProjectGraph> {
        if !self.fs.exists(&self.path) {
            info!(path = %self.path.display(), "no graph file yet; starting empty");
            return Ok(ProjectGraph::new());
        }

        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| ProjdagError::persistence(&self.path, format!("{e:#}")))?;

        let graph = from_json(&contents).map_err(|e| self.locate(e))?;

        debug!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph"
        );
        Ok(graph)
    }

    /// Write the graph next to its destination, then move it into place so a
    /// failed write never clobbers the previous file.
    pub fn save(&self, graph: &ProjectGraph) -> Result<()> {
        let json = to_json(graph)?;
        let tmp = tmp_path(&self.path);

        self.fs
            .write(&tmp, json.as_bytes())
            .map_err(|e| ProjdagError::persistence(&tmp, format!("{e:#}")))?;
        self.fs
            .rename(&tmp, &self.path)
            .map_err(|e| ProjdagError::persistence(&self.path, format!("{e:#}")))?;

        debug!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "saved graph"
        );
        Ok(())
    }

    /// Attach the file path to content errors; cycles keep their own kind.
    fn locate(&self, err: ProjdagError) -> ProjdagError {
        match err {
            ProjdagError::JsonError(e) => {
                ProjdagError::persistence(&self.path, format!("malformed graph file: {e}"))
            }
            ProjdagError::MalformedGraph(reason) => ProjdagError::persistence(&self.path, reason),
            other => other,
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "graph.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
