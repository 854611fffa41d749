// src/views/gantt.rs

use chrono::{DateTime, Utc};

use crate::dag::ProjectGraph;
use crate::model::{NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GanttRow {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub estimated_hours: u32,
}

/// One row per scheduled node, in `order`. Unscheduled nodes are left out.
pub fn gantt(graph: &ProjectGraph, order: &[NodeId]) -> Vec<GanttRow> {
    order
        .iter()
        .filter_map(|&id| {
            let node = graph.node(id)?;
            let tl = node.timeline()?;
            Some(GanttRow {
                id,
                name: node.name().to_string(),
                kind: node.kind(),
                start: tl.start(),
                end: tl.end(),
                estimated_hours: tl.estimated_hours(),
            })
        })
        .collect()
}
