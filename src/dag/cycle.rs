// src/dag/cycle.rs

//! Cycle detection and reachability over the project graph.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::model::{EdgeKind, Node};

type Graph = StableDiGraph<Node, EdgeKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Exhaustive DFS over the whole graph.
///
/// Returns the first cycle found as a closed path (`first == last`), visiting
/// roots in creation order so the reported cycle is stable. The walk keeps an
/// explicit stack, so chain length is bounded by memory only.
pub fn find_cycle(graph: &Graph) -> Option<Vec<NodeIndex>> {
    let mut marks: HashMap<NodeIndex, Mark> = HashMap::new();

    let mut roots: Vec<NodeIndex> = graph.node_indices().collect();
    roots.sort_by_key(|&i| graph[i].seq());

    for root in roots {
        if marks.contains_key(&root) {
            continue;
        }
        if let Some(cycle) = dfs_detect_cycle(graph, root, &mut marks) {
            return Some(cycle);
        }
    }

    None
}

fn dfs_detect_cycle(
    graph: &Graph,
    root: NodeIndex,
    marks: &mut HashMap<NodeIndex, Mark>,
) -> Option<Vec<NodeIndex>> {
    marks.insert(root, Mark::InProgress);
    let mut stack = vec![(root, graph.neighbors_directed(root, Direction::Outgoing))];

    while let Some((_, successors)) = stack.last_mut() {
        let Some(next) = successors.next() else {
            if let Some((node, _)) = stack.pop() {
                marks.insert(node, Mark::Done);
            }
            continue;
        };

        match marks.get(&next) {
            None => {
                marks.insert(next, Mark::InProgress);
                stack.push((next, graph.neighbors_directed(next, Direction::Outgoing)));
            }
            Some(Mark::InProgress) => {
                // `next` is on the current path: everything from it onwards
                // closes the loop.
                let start = stack.iter().position(|(n, _)| *n == next).unwrap_or(0);
                let mut cycle: Vec<NodeIndex> = stack[start..].iter().map(|(n, _)| *n).collect();
                cycle.push(next);
                return Some(cycle);
            }
            Some(Mark::Done) => {}
        }
    }

    None
}

/// Shortest path `start -> ... -> goal` following edge direction, if any.
///
/// `start == goal` yields the one-element path `[start]`.
pub fn path_between(graph: &Graph, start: NodeIndex, goal: NodeIndex) -> Option<Vec<NodeIndex>> {
    let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
    let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        if node == goal {
            let mut path = vec![goal];
            let mut cur = goal;
            while let Some(&prev) = came_from.get(&cur) {
                path.push(prev);
                cur = prev;
            }
            path.reverse();
            return Some(path);
        }

        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if seen.insert(next) {
                came_from.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}
