// src/model/node.rs

//! Node records and the kind-specific attribute rules.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ProjdagError, Result};
use crate::model::{NodeId, NodeKind, Timeline};

type Participants = BTreeSet<String>;

/// Per-kind attributes. The variant is the node's kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDetails {
    Spec,
    Project {
        /// Declared parent `Spec`.
        #[serde(default)]
        parent: Option<NodeId>,
        #[serde(default)]
        participants: Participants,
    },
    SubProject {
        /// Declared parent `Project`.
        #[serde(default)]
        parent: Option<NodeId>,
    },
    Epic {
        #[serde(default)]
        points: u32,
        #[serde(default)]
        participants: Participants,
    },
    UserStory {
        #[serde(default)]
        points: u32,
        #[serde(default)]
        assignee: Option<String>,
    },
}

impl NodeDetails {
    pub fn empty(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Spec => NodeDetails::Spec,
            NodeKind::Project => NodeDetails::Project {
                parent: None,
                participants: Participants::new(),
            },
            NodeKind::SubProject => NodeDetails::SubProject { parent: None },
            NodeKind::Epic => NodeDetails::Epic {
                points: 0,
                participants: Participants::new(),
            },
            NodeKind::UserStory => NodeDetails::UserStory {
                points: 0,
                assignee: None,
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeDetails::Spec => NodeKind::Spec,
            NodeDetails::Project { .. } => NodeKind::Project,
            NodeDetails::SubProject { .. } => NodeKind::SubProject,
            NodeDetails::Epic { .. } => NodeKind::Epic,
            NodeDetails::UserStory { .. } => NodeKind::UserStory,
        }
    }
}

/// A single work item in the project graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    /// Creation sequence within the owning graph; breaks ordering ties.
    seq: u64,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(flatten)]
    details: NodeDetails,
}

impl Node {
    pub(crate) fn new(id: NodeId, seq: u64, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            seq,
            name: name.into(),
            timeline: None,
            owner: None,
            link: None,
            details: NodeDetails::empty(kind),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> NodeKind {
        self.details.kind()
    }

    pub fn details(&self) -> &NodeDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.timeline = Some(timeline);
    }

    pub fn clear_timeline(&mut self) -> Option<Timeline> {
        self.timeline.take()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link(&mut self, link: Option<String>) {
        self.link = link;
    }

    /// Points estimate; `None` for kinds that do not carry one.
    pub fn points(&self) -> Option<u32> {
        match &self.details {
            NodeDetails::Epic { points, .. } | NodeDetails::UserStory { points, .. } => {
                Some(*points)
            }
            _ => None,
        }
    }

    pub fn set_points(&mut self, value: u32) -> Result<()> {
        let (id, kind) = (self.id, self.kind());
        match &mut self.details {
            NodeDetails::Epic { points, .. } | NodeDetails::UserStory { points, .. } => {
                *points = value;
                Ok(())
            }
            _ => Err(ProjdagError::invalid(
                id,
                format!("{kind} nodes do not carry points"),
            )),
        }
    }

    pub fn assignee(&self) -> Option<&str> {
        match &self.details {
            NodeDetails::UserStory { assignee, .. } => assignee.as_deref(),
            _ => None,
        }
    }

    pub fn set_assignee(&mut self, value: Option<String>) -> Result<()> {
        let (id, kind) = (self.id, self.kind());
        match &mut self.details {
            NodeDetails::UserStory { assignee, .. } => {
                *assignee = value;
                Ok(())
            }
            _ => Err(ProjdagError::invalid(
                id,
                format!("{kind} nodes cannot be assigned"),
            )),
        }
    }

    pub fn participants(&self) -> Option<&BTreeSet<String>> {
        match &self.details {
            NodeDetails::Project { participants, .. } | NodeDetails::Epic { participants, .. } => {
                Some(participants)
            }
            _ => None,
        }
    }

    pub fn add_participant(&mut self, participant: impl Into<String>) -> Result<()> {
        let (id, kind) = (self.id, self.kind());
        match &mut self.details {
            NodeDetails::Project { participants, .. } | NodeDetails::Epic { participants, .. } => {
                participants.insert(participant.into());
                Ok(())
            }
            _ => Err(ProjdagError::invalid(
                id,
                format!("{kind} nodes do not track participants"),
            )),
        }
    }

    pub fn remove_participant(&mut self, participant: &str) -> Result<()> {
        let (id, kind) = (self.id, self.kind());
        match &mut self.details {
            NodeDetails::Project { participants, .. } | NodeDetails::Epic { participants, .. } => {
                if participants.remove(participant) {
                    Ok(())
                } else {
                    Err(ProjdagError::invalid(
                        id,
                        format!("participant '{participant}' is not on this {kind}"),
                    ))
                }
            }
            _ => Err(ProjdagError::invalid(
                id,
                format!("{kind} nodes do not track participants"),
            )),
        }
    }

    /// Declared parent for `Project` / `SubProject` nodes.
    pub fn parent(&self) -> Option<NodeId> {
        match &self.details {
            NodeDetails::Project { parent, .. } | NodeDetails::SubProject { parent } => *parent,
            _ => None,
        }
    }

    /// Drop the parent back-reference if it points at `removed`.
    pub(crate) fn forget_parent(&mut self, removed: NodeId) {
        if let NodeDetails::Project { parent, .. } | NodeDetails::SubProject { parent } =
            &mut self.details
        {
            if *parent == Some(removed) {
                *parent = None;
            }
        }
    }
}

/// Everything needed to create a node; consumed by
/// [`ProjectGraph::insert`](crate::dag::ProjectGraph::insert).
#[derive(Debug, Clone)]
pub struct NodeSpec {
    kind: NodeKind,
    name: String,
    points: Option<u32>,
    assignee: Option<String>,
    parent: Option<NodeId>,
    owner: Option<String>,
    link: Option<String>,
    timeline: Option<Timeline>,
    participants: Participants,
}

impl NodeSpec {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            points: None,
            assignee: None,
            parent: None,
            owner: None,
            link: None,
            timeline: None,
            participants: Participants::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participants.insert(participant.into());
        self
    }

    /// Reject attributes that do not apply to the kind. The parent's
    /// existence is the graph's concern, not checked here.
    pub(crate) fn validate(&self) -> Result<()> {
        let kind = self.kind;
        let reject = |reason: String| {
            Err(ProjdagError::InvalidAttribute { id: None, reason })
        };

        if self.parent.is_some() && kind.parent_kind().is_none() {
            return reject(format!("{kind} nodes do not have a parent"));
        }
        if self.points.is_some() && !kind.has_points() {
            return reject(format!("{kind} nodes do not carry points"));
        }
        if self.assignee.is_some() && kind != NodeKind::UserStory {
            return reject(format!("{kind} nodes cannot be assigned"));
        }
        if !self.participants.is_empty() && !kind.has_participants() {
            return reject(format!("{kind} nodes do not track participants"));
        }
        Ok(())
    }

    /// Materialize a node that passed [`validate`](Self::validate).
    pub(crate) fn build(self, id: NodeId, seq: u64) -> Result<Node> {
        let kind = self.kind;
        let mut node = Node::new(id, seq, kind, self.name);
        node.timeline = self.timeline;
        node.owner = self.owner;
        node.link = self.link;

        if let NodeDetails::Project { parent, .. } | NodeDetails::SubProject { parent } =
            &mut node.details
        {
            *parent = self.parent;
        }
        if let Some(points) = self.points {
            node.set_points(points)?;
        }
        if self.assignee.is_some() {
            node.set_assignee(self.assignee)?;
        }
        for participant in self.participants {
            node.add_participant(participant)?;
        }

        Ok(node)
    }
}
