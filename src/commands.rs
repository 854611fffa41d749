// src/commands.rs

//! Applies one parsed [`Command`] to a loaded graph.
//!
//! This is the only layer that both mutates the graph and talks to the user:
//! references are resolved here, results are rendered here, and every
//! mutation is logged. The caller decides whether to persist based on
//! [`Outcome::modified`].

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cli::{
    AddArgs, Command, EdgeArgs, OptionalTimeline, SetArgs, TimelineArgs, ViewArg,
};
use crate::config::ConfigFile;
use crate::dag::ProjectGraph;
use crate::errors::{ProjdagError, Result};
use crate::model::{Duration, EdgeKind, NodeId, NodeKind, NodeSpec, Timeline};
use crate::schedule::{AllocateOptions, allocate_with, critical_path};
use crate::{render, views};

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout.
    pub output: String,
    /// Whether the graph changed and should be saved.
    pub modified: bool,
}

impl Outcome {
    fn changed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            modified: true,
        }
    }

    fn report(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            modified: false,
        }
    }
}

pub fn execute(cmd: &Command, graph: &mut ProjectGraph, cfg: &ConfigFile) -> Result<Outcome> {
    match cmd {
        Command::Add(args) => add(args, graph),

        Command::Remove { node } => {
            let id = graph.resolve(node)?;
            let removed = graph.remove_node(id)?;
            info!(%id, kind = %removed.kind(), "removed node");
            Ok(Outcome::changed(format!("removed {}\n", render::node_line(&removed))))
        }

        Command::Link(args) => {
            let (from, to, kind) = resolve_edge(args, graph)?;
            graph.add_edge(from, to, kind)?;
            info!(%from, %to, %kind, "added edge");
            Ok(Outcome::changed(format!(
                "linked {} -[{kind}]-> {}\n",
                from.short(),
                to.short()
            )))
        }

        Command::Unlink(args) => {
            let (from, to, kind) = resolve_edge(args, graph)?;
            graph.remove_edge(from, to, kind)?;
            info!(%from, %to, %kind, "removed edge");
            Ok(Outcome::changed(format!(
                "unlinked {} -[{kind}]-> {}\n",
                from.short(),
                to.short()
            )))
        }

        Command::List { kind } => {
            let nodes = match kind {
                Some(kind) => graph.nodes_of_kind(NodeKind::from(*kind)),
                None => graph.nodes(),
            };
            Ok(Outcome::report(render::node_list(&nodes)))
        }

        Command::Show { node } => {
            let id = graph.resolve(node)?;
            let node = graph.get(id)?;
            Ok(Outcome::report(render::node_detail(graph, node, &cfg.view)))
        }

        Command::Set(args) => set_fields(args, graph),

        Command::SetTimeline(args) => set_timeline(args, graph),

        Command::ClearTimeline { node } => {
            let id = graph.resolve(node)?;
            let previous = graph.clear_timeline(id)?;
            info!(%id, had_timeline = previous.is_some(), "cleared timeline");
            Ok(Outcome {
                output: format!("cleared timeline of {}\n", id.short()),
                modified: previous.is_some(),
            })
        }

        Command::SetPoints { node, points } => {
            let id = graph.resolve(node)?;
            graph.set_points(id, *points)?;
            info!(%id, points, "set points");
            Ok(Outcome::changed(format!("{} now has {points} points\n", id.short())))
        }

        Command::Assign { node, assignee } => {
            let id = graph.resolve(node)?;
            graph.set_assignee(id, assignee.clone())?;
            info!(%id, assignee = ?assignee, "set assignee");
            let output = match assignee {
                Some(name) => format!("assigned {} to {name}\n", id.short()),
                None => format!("unassigned {}\n", id.short()),
            };
            Ok(Outcome::changed(output))
        }

        Command::Order => {
            let order = graph.topological_order()?;
            Ok(Outcome::report(render::order(graph, &order)))
        }

        Command::Schedule => {
            let order = graph.topological_order()?;
            let options = AllocateOptions {
                detect_overbooking: cfg.schedule.detect_overbooking,
            };
            let schedule = allocate_with(graph, &order, options);
            debug!(
                slots = schedule.slots.len(),
                conflicts = schedule.conflicts.len(),
                warnings = schedule.warnings.len(),
                "allocated schedule"
            );
            Ok(Outcome::report(render::schedule(graph, &schedule, &cfg.view)))
        }

        Command::CriticalPath => {
            let path = critical_path(graph)?;
            Ok(Outcome::report(render::critical_path(graph, path.as_ref())))
        }

        Command::Validate => {
            graph.validate()?;
            Ok(Outcome::report(format!(
                "ok: {} nodes, {} edges, no cycles\n",
                graph.node_count(),
                graph.edge_count()
            )))
        }

        Command::View { view } => {
            let order = graph.topological_order()?;
            let output = match view {
                ViewArg::Swimlane => render::swimlane(&views::swimlane(graph, &order), &cfg.view),
                ViewArg::Gantt => render::gantt(&views::gantt(graph, &order), &cfg.view),
            };
            Ok(Outcome::report(output))
        }
    }
}

fn add(args: &AddArgs, graph: &mut ProjectGraph) -> Result<Outcome> {
    let kind = NodeKind::from(args.kind);
    let mut spec = NodeSpec::new(kind, args.name.clone());

    if let Some(points) = args.points {
        spec = spec.with_points(points);
    }
    if let Some(assignee) = &args.assignee {
        spec = spec.with_assignee(assignee.clone());
    }
    if let Some(parent) = &args.parent {
        spec = spec.with_parent(graph.resolve(parent)?);
    }
    if let Some(owner) = &args.owner {
        spec = spec.with_owner(owner.clone());
    }
    if let Some(link) = &args.link {
        spec = spec.with_link(link.clone());
    }
    for participant in &args.participants {
        spec = spec.with_participant(participant.clone());
    }
    if let Some(timeline) = optional_timeline(&args.timeline)? {
        spec = spec.with_timeline(timeline);
    }

    let id = graph.insert(spec)?;
    info!(%id, %kind, name = %args.name, "added node");
    Ok(Outcome::changed(format!("{id}\n")))
}

fn set_fields(args: &SetArgs, graph: &mut ProjectGraph) -> Result<Outcome> {
    let id = graph.resolve(&args.node)?;
    if args.name.is_none() && args.owner.is_none() && args.link.is_none() {
        return Err(ProjdagError::invalid(
            id,
            "nothing to set: pass --name, --owner or --link",
        ));
    }

    if let Some(name) = &args.name {
        graph.rename(id, name.clone())?;
        info!(%id, %name, "renamed node");
    }
    if let Some(owner) = &args.owner {
        let owner = non_empty(owner);
        info!(%id, owner = ?owner, "set owner");
        graph.set_owner(id, owner)?;
    }
    if let Some(link) = &args.link {
        let link = non_empty(link);
        info!(%id, link = ?link, "set link");
        graph.set_link(id, link)?;
    }

    Ok(Outcome::changed(format!("updated {}\n", render::node_line(graph.get(id)?))))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn set_timeline(args: &TimelineArgs, graph: &mut ProjectGraph) -> Result<Outcome> {
    let id = graph.resolve(&args.node)?;
    let timeline = build_timeline(args.start, args.end, args.duration, args.hours)?;
    graph.set_timeline(id, timeline)?;
    info!(%id, start = %timeline.start(), end = %timeline.end(), "set timeline");
    Ok(Outcome::changed(format!(
        "{} scheduled for {}\n",
        id.short(),
        timeline.duration()
    )))
}

fn optional_timeline(args: &OptionalTimeline) -> Result<Option<Timeline>> {
    match args.start {
        Some(start) => build_timeline(start, args.end, args.duration, args.hours).map(Some),
        None => Ok(None),
    }
}

fn build_timeline(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    duration: Option<Duration>,
    hours: u32,
) -> Result<Timeline> {
    match (end, duration) {
        (Some(end), _) => Timeline::new(start, end, hours),
        (None, Some(duration)) => Timeline::from_start_duration(start, duration, hours),
        (None, None) => Err(ProjdagError::InvalidAttribute {
            id: None,
            reason: "a timeline needs an end or a duration".to_string(),
        }),
    }
}

fn resolve_edge(args: &EdgeArgs, graph: &ProjectGraph) -> Result<(NodeId, NodeId, EdgeKind)> {
    let from = graph.resolve(&args.from)?;
    let to = graph.resolve(&args.to)?;
    Ok((from, to, EdgeKind::from(args.kind)))
}
