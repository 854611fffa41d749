#![allow(dead_code)]

use std::collections::HashMap;

use projdag::dag::ProjectGraph;
use projdag::model::{EdgeKind, NodeId, NodeKind, NodeSpec};

use crate::timeline;

/// Builder for `ProjectGraph` that lets tests refer to nodes by a short name.
///
/// Names are only a test convenience; they become the node names as well.
/// Every step panics on failure, so a builder that returns is a valid graph.
pub struct GraphBuilder {
    graph: ProjectGraph,
    ids: HashMap<String, NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: ProjectGraph::new(),
            ids: HashMap::new(),
        }
    }

    pub fn node(mut self, name: &str, kind: NodeKind) -> Self {
        let id = self.graph.add_node(kind, name);
        self.ids.insert(name.to_string(), id);
        self
    }

    /// Add a node from a prepared `NodeSpec`, registered under `name`.
    pub fn spec(mut self, name: &str, spec: NodeSpec) -> Self {
        let id = self
            .graph
            .insert(spec)
            .unwrap_or_else(|e| panic!("inserting {name}: {e}"));
        self.ids.insert(name.to_string(), id);
        self
    }

    pub fn story(self, name: &str, points: u32, assignee: Option<&str>) -> Self {
        let mut spec = NodeSpec::new(NodeKind::UserStory, name).with_points(points);
        if let Some(assignee) = assignee {
            spec = spec.with_assignee(assignee);
        }
        self.spec(name, spec)
    }

    pub fn edge(mut self, from: &str, to: &str, kind: EdgeKind) -> Self {
        let (a, b) = (self.id(from), self.id(to));
        self.graph
            .add_edge(a, b, kind)
            .unwrap_or_else(|e| panic!("linking {from} -> {to}: {e}"));
        self
    }

    pub fn depends_on(self, from: &str, to: &str) -> Self {
        self.edge(from, to, EdgeKind::DependsOn)
    }

    pub fn blocked_by(self, from: &str, to: &str) -> Self {
        self.edge(from, to, EdgeKind::BlockedBy)
    }

    pub fn part_of(self, from: &str, to: &str) -> Self {
        self.edge(from, to, EdgeKind::PartOf)
    }

    /// Give `name` the timeline `day(start)..day(end)`.
    pub fn scheduled(mut self, name: &str, start: u32, end: u32, hours: u32) -> Self {
        let id = self.id(name);
        self.graph
            .set_timeline(id, timeline(start, end, hours))
            .unwrap_or_else(|e| panic!("scheduling {name}: {e}"));
        self
    }

    pub fn id(&self, name: &str) -> NodeId {
        *self
            .ids
            .get(name)
            .unwrap_or_else(|| panic!("no node named {name} in builder"))
    }

    pub fn build(self) -> ProjectGraph {
        self.graph
    }

    /// The graph plus the name-to-id table.
    pub fn build_with_ids(self) -> (ProjectGraph, Ids) {
        (self.graph, Ids(self.ids))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Name-to-id lookup returned by [`GraphBuilder::build_with_ids`].
#[derive(Debug, Clone)]
pub struct Ids(HashMap<String, NodeId>);

impl Ids {
    pub fn get(&self, name: &str) -> NodeId {
        *self
            .0
            .get(name)
            .unwrap_or_else(|| panic!("no node named {name}"))
    }

    /// Ids for several names, in the given order.
    pub fn all(&self, names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|n| self.get(n)).collect()
    }
}

impl std::ops::Index<&str> for Ids {
    type Output = NodeId;

    fn index(&self, name: &str) -> &NodeId {
        self.0
            .get(name)
            .unwrap_or_else(|| panic!("no node named {name}"))
    }
}
