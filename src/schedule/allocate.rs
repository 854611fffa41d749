// src/schedule/allocate.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::dag::ProjectGraph;
use crate::model::{NodeId, NodeKind, Timeline};

/// A concrete `[start, end]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<&Timeline> for Interval {
    fn from(tl: &Timeline) -> Self {
        Self {
            start: tl.start(),
            end: tl.end(),
        }
    }
}

/// Allocation result for a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: NodeId,
    /// Declared interval, if the node has a timeline.
    pub interval: Option<Interval>,
    /// Latest end among the node's scheduled ordering dependencies.
    pub earliest_start: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// `node` is declared to start before some of its dependencies end.
    Dependency {
        node: NodeId,
        start: DateTime<Utc>,
        required_start: DateTime<Utc>,
        /// Dependencies whose end falls after `start`, in graph order.
        blockers: Vec<NodeId>,
    },
    /// Two stories for the same assignee overlap in time.
    Overbooked {
        assignee: String,
        first: NodeId,
        second: NodeId,
    },
}

impl Conflict {
    /// Nodes implicated by this conflict.
    pub fn nodes(&self) -> Vec<NodeId> {
        match self {
            Conflict::Dependency { node, .. } => vec![*node],
            Conflict::Overbooked { first, second, .. } => vec![*first, *second],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `dependency` has no timeline, so it could not constrain `node`.
    UnscheduledDependency { node: NodeId, dependency: NodeId },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub order: Vec<NodeId>,
    pub slots: Vec<Slot>,
    pub conflicts: Vec<Conflict>,
    pub warnings: Vec<Warning>,
}

impl Schedule {
    pub fn is_feasible(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn conflicts_for(&self, id: NodeId) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.nodes().contains(&id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocateOptions {
    /// Report overlapping stories that share an assignee.
    pub detect_overbooking: bool,
}

impl Default for AllocateOptions {
    fn default() -> Self {
        Self {
            detect_overbooking: true,
        }
    }
}

/// [`allocate_with`] using default options.
pub fn allocate(graph: &ProjectGraph, order: &[NodeId]) -> Schedule {
    allocate_with(graph, order, AllocateOptions::default())
}

/// Walk `order` and check every scheduled node against its direct
/// `DependsOn` / `BlockedBy` targets: it may not start before the latest of
/// their ends. Violations become [`Conflict`]s and unscheduled targets become
/// [`Warning`]s; neither stops the walk. Identifiers not in the graph are
/// skipped.
pub fn allocate_with(graph: &ProjectGraph, order: &[NodeId], options: AllocateOptions) -> Schedule {
    let mut schedule = Schedule {
        order: order.to_vec(),
        ..Schedule::default()
    };

    for &id in order {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let timeline = node.timeline();

        let mut deps: Vec<NodeId> = graph
            .dependencies_of(id)
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, kind)| kind.is_ordering())
            .map(|(dep, _)| dep)
            .collect();
        // A target can be both depended on and blocking; check it once.
        deps.dedup();

        let mut earliest_start: Option<DateTime<Utc>> = None;
        let mut scheduled_deps: Vec<(NodeId, DateTime<Utc>)> = Vec::new();
        for dep in deps {
            match graph.node(dep).and_then(|d| d.timeline()) {
                Some(dep_tl) => {
                    earliest_start = earliest_start.max(Some(dep_tl.end()));
                    scheduled_deps.push((dep, dep_tl.end()));
                }
                None if timeline.is_some() => {
                    schedule.warnings.push(Warning::UnscheduledDependency {
                        node: id,
                        dependency: dep,
                    });
                }
                None => {}
            }
        }

        if let (Some(tl), Some(required)) = (timeline, earliest_start) {
            if tl.start() < required {
                let blockers = scheduled_deps
                    .iter()
                    .filter(|(_, end)| *end > tl.start())
                    .map(|(dep, _)| *dep)
                    .collect();
                schedule.conflicts.push(Conflict::Dependency {
                    node: id,
                    start: tl.start(),
                    required_start: required,
                    blockers,
                });
            }
        }

        schedule.slots.push(Slot {
            id,
            interval: timeline.map(Interval::from),
            earliest_start,
        });
    }

    if options.detect_overbooking {
        schedule.conflicts.extend(overbooked(graph, order));
    }

    schedule
}

/// Pairs of assigned, scheduled stories whose intervals overlap, grouped by
/// assignee (alphabetically) and then in `order`.
fn overbooked(graph: &ProjectGraph, order: &[NodeId]) -> Vec<Conflict> {
    let mut by_assignee: BTreeMap<&str, Vec<(NodeId, &Timeline)>> = BTreeMap::new();
    for &id in order {
        let Some(node) = graph.node(id) else {
            continue;
        };
        if node.kind() != NodeKind::UserStory {
            continue;
        }
        if let (Some(assignee), Some(tl)) = (node.assignee(), node.timeline()) {
            by_assignee.entry(assignee).or_default().push((id, tl));
        }
    }

    let mut conflicts = Vec::new();
    for (assignee, stories) in by_assignee {
        for (i, (first, a)) in stories.iter().enumerate() {
            for (second, b) in &stories[i + 1..] {
                if a.overlaps(b) {
                    conflicts.push(Conflict::Overbooked {
                        assignee: assignee.to_string(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
    }
    conflicts
}
