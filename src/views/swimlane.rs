// src/views/swimlane.rs

use std::fmt;

use crate::dag::ProjectGraph;
use crate::model::{NodeId, NodeKind, Timeline};

/// What a swimlane groups by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LaneKey {
    /// Stories assigned to this person.
    Assignee(String),
    /// Stories nobody has picked up yet.
    Unassigned,
    /// Every non-story node of this kind.
    Kind(NodeKind),
}

impl fmt::Display for LaneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKey::Assignee(name) => write!(f, "@{name}"),
            LaneKey::Unassigned => f.write_str("unassigned"),
            LaneKey::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwimlaneRow {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub points: Option<u32>,
    pub timeline: Option<Timeline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub key: LaneKey,
    pub rows: Vec<SwimlaneRow>,
}

/// Group nodes into lanes: assignee for stories, kind for everything else.
///
/// Lanes appear in the order their first node appears in `order`, and rows
/// keep `order` within a lane.
pub fn swimlane(graph: &ProjectGraph, order: &[NodeId]) -> Vec<Lane> {
    let mut lanes: Vec<Lane> = Vec::new();

    for &id in order {
        let Some(node) = graph.node(id) else {
            continue;
        };

        let key = match (node.kind(), node.assignee()) {
            (NodeKind::UserStory, Some(assignee)) => LaneKey::Assignee(assignee.to_string()),
            (NodeKind::UserStory, None) => LaneKey::Unassigned,
            (kind, _) => LaneKey::Kind(kind),
        };

        let row = SwimlaneRow {
            id,
            name: node.name().to_string(),
            kind: node.kind(),
            points: node.points(),
            timeline: node.timeline().copied(),
        };

        match lanes.iter_mut().find(|lane| lane.key == key) {
            Some(lane) => lane.rows.push(row),
            None => lanes.push(Lane {
                key,
                rows: vec![row],
            }),
        }
    }

    lanes
}
