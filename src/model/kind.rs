// src/model/kind.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five levels of the work hierarchy.
///
/// Ordering follows the hierarchy (`Spec` first, `UserStory` last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Spec,
    Project,
    SubProject,
    Epic,
    UserStory,
}

impl NodeKind {
    /// Whether nodes of this kind carry a points estimate.
    pub fn has_points(self) -> bool {
        matches!(self, NodeKind::Epic | NodeKind::UserStory)
    }

    /// Whether nodes of this kind track participants.
    pub fn has_participants(self) -> bool {
        matches!(self, NodeKind::Project | NodeKind::Epic)
    }

    /// Kind a `parent` back-reference must point at, if this kind has one.
    pub fn parent_kind(self) -> Option<NodeKind> {
        match self {
            NodeKind::Project => Some(NodeKind::Spec),
            NodeKind::SubProject => Some(NodeKind::Project),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Spec => "spec",
            NodeKind::Project => "project",
            NodeKind::SubProject => "sub-project",
            NodeKind::Epic => "epic",
            NodeKind::UserStory => "user-story",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "spec" => Ok(NodeKind::Spec),
            "project" => Ok(NodeKind::Project),
            "sub-project" | "subproject" => Ok(NodeKind::SubProject),
            "epic" => Ok(NodeKind::Epic),
            "user-story" | "userstory" | "story" => Ok(NodeKind::UserStory),
            other => Err(format!(
                "unknown node kind: {other} (expected spec, project, sub-project, epic or user-story)"
            )),
        }
    }
}

/// Typed, directed edge between two nodes.
///
/// For an edge `A -> B`:
/// - `DependsOn`: A cannot start before B completes.
/// - `BlockedBy`: A is blocked by B. Declared independently of `DependsOn`.
/// - `PartOf`: A is contained in B.
///
/// In every case B comes before A in a topological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    DependsOn,
    BlockedBy,
    PartOf,
}

impl EdgeKind {
    /// Edges that constrain when the source may start.
    pub fn is_ordering(self) -> bool {
        matches!(self, EdgeKind::DependsOn | EdgeKind::BlockedBy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::DependsOn => "depends-on",
            EdgeKind::BlockedBy => "blocked-by",
            EdgeKind::PartOf => "part-of",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "depends-on" | "dependson" => Ok(EdgeKind::DependsOn),
            "blocked-by" | "blockedby" => Ok(EdgeKind::BlockedBy),
            "part-of" | "partof" => Ok(EdgeKind::PartOf),
            other => Err(format!(
                "unknown edge kind: {other} (expected depends-on, blocked-by or part-of)"
            )),
        }
    }
}
