// src/dag/order.rs

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::errors::{ProjdagError, Result};
use crate::model::{EdgeKind, Node};

/// Kahn's algorithm, dependencies first.
///
/// An edge `A -> B` means B must be emitted before A, so a node becomes ready
/// once all of its *outgoing* edges have been resolved. Among ready nodes the
/// one with the lowest creation sequence is emitted next.
///
/// Stalling with nodes left over can only happen on a cyclic graph, which the
/// engine never builds; it is reported as an internal invariant violation.
pub fn kahn_by_seq(graph: &StableDiGraph<Node, EdgeKind>) -> Result<Vec<NodeIndex>> {
    let mut pending: HashMap<NodeIndex, usize> = HashMap::with_capacity(graph.node_count());
    let mut ready: BinaryHeap<Reverse<(u64, NodeIndex)>> = BinaryHeap::new();

    for idx in graph.node_indices() {
        let unresolved = graph.neighbors_directed(idx, Direction::Outgoing).count();
        if unresolved == 0 {
            ready.push(Reverse((graph[idx].seq(), idx)));
        }
        pending.insert(idx, unresolved);
    }

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse((_, idx))) = ready.pop() {
        order.push(idx);

        // One entry per edge, so parallel edges of different kinds are each
        // counted off.
        for dependent in graph.neighbors_directed(idx, Direction::Incoming) {
            if let Some(count) = pending.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push(Reverse((graph[dependent].seq(), dependent)));
                }
            }
        }
    }

    if order.len() != graph.node_count() {
        return Err(ProjdagError::InternalInvariantViolation(format!(
            "topological sort stalled with {} of {} nodes unplaced",
            graph.node_count() - order.len(),
            graph.node_count()
        )));
    }

    Ok(order)
}
