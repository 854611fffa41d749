// src/dag/graph.rs

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::dag::{cycle, order};
use crate::errors::{ProjdagError, Result};
use crate::model::{EdgeKind, Node, NodeId, NodeKind, NodeSpec, Timeline};

/// A typed edge addressed by external identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }
}

/// The project DAG.
///
/// Nodes live in a petgraph `StableDiGraph`, whose indices survive removals,
/// and are looked up by [`NodeId`] through `index`. Every public mutation
/// either fully applies or leaves the graph untouched, and none of them can
/// introduce a cycle or a dangling edge.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    graph: StableDiGraph<Node, EdgeKind>,
    index: HashMap<NodeId, NodeIndex>,
    /// Next creation sequence number to hand out.
    next_seq: u64,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unconnected node with no attributes beyond its name.
    pub fn add_node(&mut self, kind: NodeKind, name: impl Into<String>) -> NodeId {
        let id = self.fresh_id();
        let node = Node::new(id, self.next_seq, kind, name);
        self.commit_node(node);
        id
    }

    /// Add a node described by a [`NodeSpec`].
    ///
    /// Fails with `InvalidAttribute` if `spec` sets attributes the kind does
    /// not carry or names a parent of the wrong kind, and with `NotFound` if
    /// the parent does not exist. The node has no identifier yet at that
    /// point, so `InvalidAttribute` carries none. A valid parent is linked with a
    /// `PartOf` edge from the new node.
    pub fn insert(&mut self, spec: NodeSpec) -> Result<NodeId> {
        spec.validate()?;
        let parent_idx = match spec.parent() {
            Some(parent) => {
                let idx = self.idx(parent)?;
                let expected = spec.kind().parent_kind();
                let actual = self.graph[idx].kind();
                if expected != Some(actual) {
                    return Err(ProjdagError::InvalidAttribute {
                        id: None,
                        reason: format!(
                            "a {} cannot have {parent} ({actual}) as parent",
                            spec.kind()
                        ),
                    });
                }
                Some(idx)
            }
            None => None,
        };

        let id = self.fresh_id();
        let node = spec.build(id, self.next_seq)?;
        let idx = self.commit_node(node);
        if let Some(parent_idx) = parent_idx {
            // A brand-new node has no incoming edges, so this cannot close a cycle.
            self.graph.add_edge(idx, parent_idx, EdgeKind::PartOf);
        }
        Ok(id)
    }

    /// Remove a node together with every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let idx = self.idx(id)?;
        let node = self
            .graph
            .remove_node(idx)
            .ok_or_else(|| stale_index(id))?;
        self.index.remove(&id);

        for other in self.graph.node_weights_mut() {
            other.forget_parent(id);
        }

        Ok(node)
    }

    /// Add `from -[kind]-> to`.
    ///
    /// Re-adding an existing edge is a no-op. If `to` can already reach
    /// `from`, the edge would close a cycle and `CycleDetected` is returned
    /// with the offending path, leaving the graph unchanged.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> Result<()> {
        let a = self.idx(from)?;
        let b = self.idx(to)?;

        if self.find_edge(a, b, kind).is_some() {
            return Ok(());
        }

        if let Some(back) = cycle::path_between(&self.graph, b, a) {
            let mut path = vec![from];
            path.extend(back.into_iter().map(|i| self.graph[i].id()));
            return Err(ProjdagError::CycleDetected { path });
        }

        self.graph.add_edge(a, b, kind);
        Ok(())
    }

    pub fn remove_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) -> Result<()> {
        let missing = || ProjdagError::EdgeNotFound { from, to, kind };
        let a = self.idx(from).map_err(|_| missing())?;
        let b = self.idx(to).map_err(|_| missing())?;
        let edge = self.find_edge(a, b, kind).ok_or_else(missing)?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId, kind: EdgeKind) -> bool {
        match (self.index.get(&from), self.index.get(&to)) {
            (Some(&a), Some(&b)) => self.find_edge(a, b, kind).is_some(),
            _ => false,
        }
    }

    /// Deterministic topological order: for every edge `A -> B`, `B` comes
    /// first. Ties go to the node created earliest.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let order = order::kahn_by_seq(&self.graph)?;
        Ok(order.into_iter().map(|i| self.graph[i].id()).collect())
    }

    /// Full-graph cycle check, independent of the incremental check done by
    /// [`add_edge`](Self::add_edge).
    pub fn validate(&self) -> Result<()> {
        match cycle::find_cycle(&self.graph) {
            Some(cycle) => Err(ProjdagError::CycleDetected {
                path: cycle.into_iter().map(|i| self.graph[i].id()).collect(),
            }),
            None => Ok(()),
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Like [`node`](Self::node) but with a `NotFound` error.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(ProjdagError::NodeNotFound(id))
    }

    /// Apply an attribute mutation to a single node.
    ///
    /// Attribute changes never touch edges, so the graph invariants are not
    /// at stake here; the closure's error is returned as is.
    pub fn update<T>(&mut self, id: NodeId, f: impl FnOnce(&mut Node) -> Result<T>) -> Result<T> {
        let idx = self.idx(id)?;
        f(&mut self.graph[idx])
    }

    pub fn set_points(&mut self, id: NodeId, points: u32) -> Result<()> {
        self.update(id, |node| node.set_points(points))
    }

    pub fn set_timeline(&mut self, id: NodeId, timeline: Timeline) -> Result<()> {
        self.update(id, |node| {
            node.set_timeline(timeline);
            Ok(())
        })
    }

    pub fn clear_timeline(&mut self, id: NodeId) -> Result<Option<Timeline>> {
        self.update(id, |node| Ok(node.clear_timeline()))
    }

    pub fn set_assignee(&mut self, id: NodeId, assignee: Option<String>) -> Result<()> {
        self.update(id, |node| node.set_assignee(assignee))
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        self.update(id, |node| {
            node.rename(name);
            Ok(())
        })
    }

    pub fn set_owner(&mut self, id: NodeId, owner: Option<String>) -> Result<()> {
        self.update(id, |node| {
            node.set_owner(owner);
            Ok(())
        })
    }

    pub fn set_link(&mut self, id: NodeId, link: Option<String>) -> Result<()> {
        self.update(id, |node| {
            node.set_link(link);
            Ok(())
        })
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| n.seq());
        nodes
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes().into_iter().filter(|n| n.kind() == kind).collect()
    }

    /// All edges, ordered by (source creation, target creation, kind).
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<(u64, u64, Edge)> = self
            .graph
            .edge_references()
            .map(|e| {
                let (from, to) = (&self.graph[e.source()], &self.graph[e.target()]);
                (from.seq(), to.seq(), Edge::new(from.id(), to.id(), *e.weight()))
            })
            .collect();
        edges.sort_by_key(|(a, b, e)| (*a, *b, e.kind));
        edges.into_iter().map(|(_, _, e)| e).collect()
    }

    /// Outgoing edges of `id`: the nodes it depends on, is blocked by or is
    /// part of.
    pub fn dependencies_of(&self, id: NodeId) -> Result<Vec<(NodeId, EdgeKind)>> {
        self.neighbours(id, Direction::Outgoing)
    }

    /// Incoming edges of `id`: the nodes that depend on, are blocked by or
    /// are part of it.
    pub fn dependents_of(&self, id: NodeId) -> Result<Vec<(NodeId, EdgeKind)>> {
        self.neighbours(id, Direction::Incoming)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Resolve a user-supplied reference: a full UUID, or a unique prefix of
    /// one (hyphens optional).
    pub fn resolve(&self, reference: &str) -> Result<NodeId> {
        if let Ok(id) = reference.parse::<NodeId>() {
            return if self.contains(id) {
                Ok(id)
            } else {
                Err(ProjdagError::NodeNotFound(id))
            };
        }

        let needle = reference.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(ProjdagError::UnknownReference(reference.to_string()));
        }

        let candidates: Vec<NodeId> = self
            .nodes()
            .into_iter()
            .map(|n| n.id())
            .filter(|id| id.as_uuid().simple().to_string().starts_with(&needle))
            .collect();

        match candidates.as_slice() {
            [] => Err(ProjdagError::UnknownReference(reference.to_string())),
            [id] => Ok(*id),
            _ => Err(ProjdagError::AmbiguousReference {
                reference: reference.to_string(),
                candidates,
            }),
        }
    }

    /// Rebuild a graph from previously persisted parts.
    ///
    /// Edges are inserted without the per-edge reachability check; the whole
    /// graph is validated once at the end instead. Duplicate identifiers or
    /// sequence numbers, dangling edges and dangling or mistyped parents are
    /// rejected as malformed data, and a cycle as `CycleDetected`.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>, next_seq: u64) -> Result<Self> {
        let mut out = Self::new();
        let mut seqs = HashSet::new();

        for node in nodes {
            if out.index.contains_key(&node.id()) {
                return Err(ProjdagError::MalformedGraph(format!(
                    "duplicate node id {}",
                    node.id()
                )));
            }
            if !seqs.insert(node.seq()) {
                return Err(ProjdagError::MalformedGraph(format!(
                    "duplicate creation sequence {} (node {})",
                    node.seq(),
                    node.id()
                )));
            }
            let after = node.seq().checked_add(1).ok_or_else(|| {
                ProjdagError::MalformedGraph(format!(
                    "creation sequence of node {} is out of range",
                    node.id()
                ))
            })?;
            out.next_seq = out.next_seq.max(after);
            let id = node.id();
            let idx = out.graph.add_node(node);
            out.index.insert(id, idx);
        }
        out.next_seq = out.next_seq.max(next_seq);
        if out.next_seq == u64::MAX {
            return Err(ProjdagError::MalformedGraph(
                "next creation sequence is out of range".to_string(),
            ));
        }

        for node in out.graph.node_weights() {
            let Some(parent) = node.parent() else {
                continue;
            };
            let parent_kind = out
                .node(parent)
                .map(|p| p.kind())
                .ok_or_else(|| {
                    ProjdagError::MalformedGraph(format!(
                        "node {} names missing parent {}",
                        node.id(),
                        parent
                    ))
                })?;
            if node.kind().parent_kind() != Some(parent_kind) {
                return Err(ProjdagError::MalformedGraph(format!(
                    "{} {} has a {} as parent",
                    node.kind(),
                    node.id(),
                    parent_kind
                )));
            }
        }

        for edge in edges {
            let endpoints = (out.index.get(&edge.from), out.index.get(&edge.to));
            let (Some(&a), Some(&b)) = endpoints else {
                return Err(ProjdagError::MalformedGraph(format!(
                    "edge {} -[{}]-> {} references a missing node",
                    edge.from, edge.kind, edge.to
                )));
            };
            if out.find_edge(a, b, edge.kind).is_none() {
                out.graph.add_edge(a, b, edge.kind);
            }
        }

        out.validate()?;
        Ok(out)
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    fn idx(&self, id: NodeId) -> Result<NodeIndex> {
        self.index_of(id).ok_or(ProjdagError::NodeNotFound(id))
    }

    fn fresh_id(&self) -> NodeId {
        loop {
            let id = NodeId::new();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    fn commit_node(&mut self, node: Node) -> NodeIndex {
        let id = node.id();
        self.next_seq = self.next_seq.max(node.seq().saturating_add(1));
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        idx
    }

    fn find_edge(
        &self,
        a: NodeIndex,
        b: NodeIndex,
        kind: EdgeKind,
    ) -> Option<petgraph::stable_graph::EdgeIndex> {
        self.graph
            .edges_connecting(a, b)
            .find(|e| *e.weight() == kind)
            .map(|e| e.id())
    }

    fn neighbours(&self, id: NodeId, dir: Direction) -> Result<Vec<(NodeId, EdgeKind)>> {
        let idx = self.idx(id)?;
        let mut out: Vec<(u64, NodeId, EdgeKind)> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                // Self-edges cannot exist, so the far end is whichever endpoint
                // is not `idx`.
                let other = if e.source() == idx { e.target() } else { e.source() };
                let node = &self.graph[other];
                (node.seq(), node.id(), *e.weight())
            })
            .collect();
        out.sort_by_key(|(seq, _, kind)| (*seq, *kind));
        Ok(out.into_iter().map(|(_, id, kind)| (id, kind)).collect())
    }
}

fn stale_index(id: NodeId) -> ProjdagError {
    ProjdagError::InternalInvariantViolation(format!("index entry for {id} points at no node"))
}
