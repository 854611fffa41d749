// src/errors.rs

//! Crate-wide error type.
//!
//! Every variant maps onto an [`ErrorKind`], which is what the CLI uses to
//! pick a process exit code. Core operations return these as values; nothing
//! in the core logs or prints them.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{EdgeKind, NodeId};

#[derive(Error, Debug)]
pub enum ProjdagError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("edge not found: {from} -[{kind}]-> {to}")]
    EdgeNotFound {
        from: NodeId,
        to: NodeId,
        kind: EdgeKind,
    },

    #[error("no node matches '{0}'")]
    UnknownReference(String),

    #[error("'{reference}' is ambiguous ({} nodes match)", .candidates.len())]
    AmbiguousReference {
        reference: String,
        candidates: Vec<NodeId>,
    },

    #[error("cycle detected: {}", format_path(.path))]
    CycleDetected { path: Vec<NodeId> },

    #[error("invalid attribute{}: {reason}", format_subject(.id))]
    InvalidAttribute { id: Option<NodeId>, reason: String },

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    #[error("persistence error at {}: {reason}", .path.display())]
    Persistence { path: PathBuf, reason: String },

    #[error("malformed graph data: {0}")]
    MalformedGraph(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a [`ProjdagError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    CycleDetected,
    InvalidAttribute,
    InternalInvariantViolation,
    Persistence,
    Other,
}

impl ErrorKind {
    /// Process exit code used by the `projdag` binary.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Other => 1,
            ErrorKind::NotFound => 2,
            ErrorKind::CycleDetected => 3,
            ErrorKind::InvalidAttribute => 4,
            ErrorKind::Persistence => 5,
            ErrorKind::InternalInvariantViolation => 70,
        }
    }
}

impl ProjdagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjdagError::NodeNotFound(_)
            | ProjdagError::EdgeNotFound { .. }
            | ProjdagError::UnknownReference(_)
            | ProjdagError::AmbiguousReference { .. } => ErrorKind::NotFound,
            ProjdagError::CycleDetected { .. } => ErrorKind::CycleDetected,
            ProjdagError::InvalidAttribute { .. } => ErrorKind::InvalidAttribute,
            ProjdagError::InternalInvariantViolation(_) => ErrorKind::InternalInvariantViolation,
            ProjdagError::Persistence { .. }
            | ProjdagError::MalformedGraph(_)
            | ProjdagError::IoError(_)
            | ProjdagError::JsonError(_) => ErrorKind::Persistence,
            ProjdagError::ConfigError(_) | ProjdagError::TomlError(_) | ProjdagError::Other(_) => {
                ErrorKind::Other
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }

    pub(crate) fn invalid(id: NodeId, reason: impl Into<String>) -> Self {
        ProjdagError::InvalidAttribute {
            id: Some(id),
            reason: reason.into(),
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ProjdagError::Persistence {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_subject(id: &Option<NodeId>) -> String {
    match id {
        Some(id) => format!(" on {id}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ProjdagError>;
