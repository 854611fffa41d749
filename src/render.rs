// src/render.rs

//! Plain-text rendering of query results for the CLI.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::config::ViewSection;
use crate::dag::ProjectGraph;
use crate::model::{Node, NodeId};
use crate::schedule::{Conflict, CriticalPath, Schedule, Warning};
use crate::views::{GanttRow, Lane};

fn label(graph: &ProjectGraph, id: NodeId) -> String {
    match graph.node(id) {
        Some(node) => format!("{} {}", id.short(), node.name()),
        None => id.short(),
    }
}

fn date(dt: DateTime<Utc>, view: &ViewSection) -> String {
    dt.format(&view.date_format).to_string()
}

/// One summary line per node: id, kind, name and the most useful attributes.
pub fn node_line(node: &Node) -> String {
    let mut line = format!("{}  {:<11} {}", node.id(), node.kind(), node.name());
    if let Some(points) = node.points() {
        let _ = write!(line, "  [{points} pts]");
    }
    if let Some(assignee) = node.assignee() {
        let _ = write!(line, "  @{assignee}");
    }
    line
}

pub fn node_list(nodes: &[&Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&node_line(node));
        out.push('\n');
    }
    out
}

pub fn node_detail(graph: &ProjectGraph, node: &Node, view: &ViewSection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "id:        {}", node.id());
    let _ = writeln!(out, "kind:      {}", node.kind());
    let _ = writeln!(out, "name:      {}", node.name());
    if let Some(points) = node.points() {
        let _ = writeln!(out, "points:    {points}");
    }
    if let Some(assignee) = node.assignee() {
        let _ = writeln!(out, "assignee:  {assignee}");
    }
    if let Some(parent) = node.parent() {
        let _ = writeln!(out, "parent:    {}", label(graph, parent));
    }
    if let Some(owner) = node.owner() {
        let _ = writeln!(out, "owner:     {owner}");
    }
    if let Some(link) = node.link() {
        let _ = writeln!(out, "link:      {link}");
    }
    if let Some(participants) = node.participants() {
        if !participants.is_empty() {
            let names: Vec<&str> = participants.iter().map(String::as_str).collect();
            let _ = writeln!(out, "people:    {}", names.join(", "));
        }
    }
    match node.timeline() {
        Some(tl) => {
            let _ = writeln!(
                out,
                "timeline:  {} .. {} ({}, {}h estimated)",
                date(tl.start(), view),
                date(tl.end(), view),
                tl.duration(),
                tl.estimated_hours()
            );
        }
        None => {
            let _ = writeln!(out, "timeline:  unscheduled");
        }
    }

    let deps = graph.dependencies_of(node.id()).unwrap_or_default();
    for (target, kind) in deps {
        let _ = writeln!(out, "  -> {kind} {}", label(graph, target));
    }
    let dependents = graph.dependents_of(node.id()).unwrap_or_default();
    for (source, kind) in dependents {
        let _ = writeln!(out, "  <- {kind} {}", label(graph, source));
    }
    out
}

pub fn order(graph: &ProjectGraph, order: &[NodeId]) -> String {
    let mut out = String::new();
    for (i, &id) in order.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, label(graph, id));
    }
    out
}

pub fn schedule(graph: &ProjectGraph, schedule: &Schedule, view: &ViewSection) -> String {
    let mut out = String::new();

    for slot in &schedule.slots {
        let when = match slot.interval {
            Some(iv) => format!("{} .. {}", date(iv.start, view), date(iv.end, view)),
            None => match slot.earliest_start {
                Some(t) => format!("unscheduled (earliest {})", date(t, view)),
                None => "unscheduled".to_string(),
            },
        };
        let _ = writeln!(out, "{:<40} {}", label(graph, slot.id), when);
    }

    if schedule.conflicts.is_empty() {
        let _ = writeln!(out, "\nno conflicts");
    } else {
        let _ = writeln!(out, "\nconflicts ({}):", schedule.conflicts.len());
        for conflict in &schedule.conflicts {
            match conflict {
                Conflict::Dependency {
                    node,
                    start,
                    required_start,
                    blockers,
                } => {
                    let names: Vec<String> = blockers.iter().map(|b| label(graph, *b)).collect();
                    let _ = writeln!(
                        out,
                        "  {} starts {} but its dependencies end {} ({})",
                        label(graph, *node),
                        date(*start, view),
                        date(*required_start, view),
                        names.join(", ")
                    );
                }
                Conflict::Overbooked {
                    assignee,
                    first,
                    second,
                } => {
                    let _ = writeln!(
                        out,
                        "  @{assignee} is booked on {} and {} at the same time",
                        label(graph, *first),
                        label(graph, *second)
                    );
                }
            }
        }
    }

    if !schedule.warnings.is_empty() {
        let _ = writeln!(out, "\nwarnings ({}):", schedule.warnings.len());
        for warning in &schedule.warnings {
            match warning {
                Warning::UnscheduledDependency { node, dependency } => {
                    let _ = writeln!(
                        out,
                        "  {} depends on unscheduled {}",
                        label(graph, *node),
                        label(graph, *dependency)
                    );
                }
            }
        }
    }

    out
}

pub fn critical_path(graph: &ProjectGraph, path: Option<&CriticalPath>) -> String {
    let Some(path) = path else {
        return "graph is empty\n".to_string();
    };
    let mut out = format!("critical path: {}h\n", path.total_hours);
    for id in &path.nodes {
        let hours = graph
            .node(*id)
            .and_then(|n| n.timeline())
            .map(|tl| tl.estimated_hours())
            .unwrap_or(0);
        let _ = writeln!(out, "  {:<40} {hours:>5}h", label(graph, *id));
    }
    out
}

pub fn swimlane(lanes: &[Lane], view: &ViewSection) -> String {
    let mut out = String::new();
    for lane in lanes {
        let _ = writeln!(out, "== {} ({})", lane.key, lane.rows.len());
        for row in &lane.rows {
            let mut line = format!("  {}  {}", row.id.short(), row.name);
            if let Some(points) = row.points {
                let _ = write!(line, "  [{points} pts]");
            }
            if let Some(tl) = row.timeline {
                let _ = write!(line, "  {} .. {}", date(tl.start(), view), date(tl.end(), view));
            }
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Bar chart scaled so the whole schedule spans `view.gantt_width` columns.
pub fn gantt(rows: &[GanttRow], view: &ViewSection) -> String {
    let (Some(first), Some(last)) = (
        rows.iter().map(|r| r.start).min(),
        rows.iter().map(|r| r.end).max(),
    ) else {
        return "nothing scheduled\n".to_string();
    };

    let width = view.gantt_width;
    let span = (last - first).num_seconds().max(1) as f64;
    let column = |t: DateTime<Utc>| -> usize {
        let offset = (t - first).num_seconds() as f64;
        ((offset / span) * width as f64).round() as usize
    };
    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).min(30);

    let mut out = format!(
        "{:w$}  {} .. {}\n",
        "",
        date(first, view),
        date(last, view),
        w = name_width + 10
    );
    for row in rows {
        let from = column(row.start).min(width.saturating_sub(1));
        let to = column(row.end).clamp(from + 1, width);
        let bar: String = (0..width)
            .map(|c| if c >= from && c < to { '#' } else { ' ' })
            .collect();
        let name: String = row.name.chars().take(name_width).collect();
        let _ = writeln!(
            out,
            "{}  {:<nw$}  |{}|",
            row.id.short(),
            name,
            bar,
            nw = name_width
        );
    }
    out
}
