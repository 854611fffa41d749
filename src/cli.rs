// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::{Duration, EdgeKind, NodeKind};

/// Command-line arguments for `projdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "projdag",
    version,
    about = "Plan project work as a dependency DAG and derive schedules from it.",
    long_about = None
)]
pub struct CliArgs {
    /// Graph file to operate on.
    ///
    /// Default: `PROJDAG_GRAPH`, then `[storage].graph_file` from the config,
    /// then `~/.projdag/graph.json`.
    #[arg(long, global = true, value_name = "PATH")]
    pub graph: Option<PathBuf>,

    /// Path to the config file (TOML).
    ///
    /// Default: `PROJDAG_CONFIG`, then `~/.projdag/config.toml` if it exists.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROJDAG_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a node and print its identifier.
    Add(AddArgs),

    /// Remove a node and every edge touching it.
    Remove {
        /// Node id or unique id prefix.
        node: String,
    },

    /// Add a typed edge FROM -> TO (FROM depends on / is blocked by / is part of TO).
    Link(EdgeArgs),

    /// Remove a typed edge.
    Unlink(EdgeArgs),

    /// List nodes in creation order.
    List {
        /// Only show nodes of this kind.
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Show one node with its edges.
    Show { node: String },

    /// Set a node's timeline.
    SetTimeline(TimelineArgs),

    /// Remove a node's timeline.
    ClearTimeline { node: String },

    /// Change a node's name, owner or link.
    Set(SetArgs),

    /// Set the points estimate of an epic or user story.
    SetPoints { node: String, points: u32 },

    /// Assign a user story; omit the name to unassign.
    Assign {
        node: String,
        assignee: Option<String>,
    },

    /// Print the topological order (dependencies first).
    Order,

    /// Check timelines against dependencies and assignee workloads.
    Schedule,

    /// Print the longest effort chain along depends-on edges.
    CriticalPath,

    /// Run the full-graph cycle check.
    Validate,

    /// Render a view of the ordered graph.
    View {
        #[arg(value_enum)]
        view: ViewArg,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(value_enum)]
    pub kind: KindArg,

    pub name: String,

    #[arg(long)]
    pub points: Option<u32>,

    /// Assignee (user stories only).
    #[arg(long)]
    pub assignee: Option<String>,

    /// Parent node (a spec for projects, a project for sub-projects).
    #[arg(long, value_name = "NODE")]
    pub parent: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long)]
    pub link: Option<String>,

    /// Participant (projects and epics); repeatable.
    #[arg(long = "participant", value_name = "NAME")]
    pub participants: Vec<String>,

    #[command(flatten)]
    pub timeline: OptionalTimeline,
}

/// Timeline flags that may be left out entirely. A `--start` needs either
/// `--end` or `--duration`.
#[derive(Debug, Clone, Args)]
pub struct OptionalTimeline {
    /// Start date (`YYYY-MM-DD`, `YYYY-MM-DD HH:MM` or RFC 3339).
    #[arg(long, value_parser = parse_instant)]
    pub start: Option<DateTime<Utc>>,

    /// End date; alternative to `--duration`.
    #[arg(long, value_parser = parse_instant, requires = "start")]
    pub end: Option<DateTime<Utc>>,

    /// Length such as `5h`, `3d` or `2w`; alternative to `--end`.
    #[arg(long, requires = "start", conflicts_with = "end")]
    pub duration: Option<Duration>,

    /// Effort estimate in hours.
    #[arg(long, default_value_t = 0)]
    pub hours: u32,
}

#[derive(Debug, Clone, Args)]
pub struct TimelineArgs {
    pub node: String,

    #[arg(long, value_parser = parse_instant)]
    pub start: DateTime<Utc>,

    #[arg(long, value_parser = parse_instant, required_unless_present = "duration")]
    pub end: Option<DateTime<Utc>>,

    #[arg(long, conflicts_with = "end")]
    pub duration: Option<Duration>,

    #[arg(long, default_value_t = 0)]
    pub hours: u32,
}

/// At least one field must be given. An empty `--owner` or `--link` clears it.
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    pub node: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct EdgeArgs {
    pub from: String,
    pub to: String,

    #[arg(long, value_enum, default_value_t = EdgeKindArg::DependsOn)]
    pub kind: EdgeKindArg,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Spec,
    Project,
    SubProject,
    Epic,
    UserStory,
}

impl From<KindArg> for NodeKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Spec => NodeKind::Spec,
            KindArg::Project => NodeKind::Project,
            KindArg::SubProject => NodeKind::SubProject,
            KindArg::Epic => NodeKind::Epic,
            KindArg::UserStory => NodeKind::UserStory,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EdgeKindArg {
    DependsOn,
    BlockedBy,
    PartOf,
}

impl From<EdgeKindArg> for EdgeKind {
    fn from(arg: EdgeKindArg) -> Self {
        match arg {
            EdgeKindArg::DependsOn => EdgeKind::DependsOn,
            EdgeKindArg::BlockedBy => EdgeKind::BlockedBy,
            EdgeKindArg::PartOf => EdgeKind::PartOf,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Swimlane,
    Gantt,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` or a bare date
/// (midnight UTC).
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date: {s} (expected YYYY-MM-DD or RFC 3339)"))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
