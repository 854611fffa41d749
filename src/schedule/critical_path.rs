// src/schedule/critical_path.rs

use std::collections::HashMap;

use crate::dag::ProjectGraph;
use crate::errors::Result;
use crate::model::{EdgeKind, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    /// Chain in execution order: each node depends on the one before it.
    pub nodes: Vec<NodeId>,
    pub total_hours: u64,
}

/// Longest cumulative `estimated_hours` chain along `DependsOn` edges.
///
/// Unscheduled nodes weigh nothing. Among equally heavy dependencies the one
/// first in topological order is followed. Among equally heavy path ends the
/// one latest in topological order wins, so zero-hour dependents of the
/// heaviest chain stay on it. Returns `None` for an empty graph.
pub fn critical_path(graph: &ProjectGraph) -> Result<Option<CriticalPath>> {
    let order = graph.topological_order()?;

    let mut best: HashMap<NodeId, u64> = HashMap::with_capacity(order.len());
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut tail: Option<(NodeId, u64)> = None;

    for &id in &order {
        let own = graph
            .get(id)?
            .timeline()
            .map(|tl| u64::from(tl.estimated_hours()))
            .unwrap_or(0);

        let mut upstream: Option<(NodeId, u64)> = None;
        for (dep, kind) in graph.dependencies_of(id)? {
            if kind != EdgeKind::DependsOn {
                continue;
            }
            // Dependencies precede `id` in the order, so they are already scored.
            let score = best.get(&dep).copied().unwrap_or(0);
            if upstream.is_none_or(|(_, s)| score > s) {
                upstream = Some((dep, score));
            }
        }

        let total = own + upstream.map(|(_, s)| s).unwrap_or(0);
        if let Some((dep, _)) = upstream {
            prev.insert(id, dep);
        }
        best.insert(id, total);

        if tail.is_none_or(|(_, t)| total >= t) {
            tail = Some((id, total));
        }
    }

    Ok(tail.map(|(end, total_hours)| {
        let mut nodes = vec![end];
        let mut cur = end;
        while let Some(&p) = prev.get(&cur) {
            nodes.push(p);
            cur = p;
        }
        nodes.reverse();
        CriticalPath { nodes, total_hours }
    }))
}
