mod common;

use clap::Parser;
use projdag::cli::{CliArgs, Command};
use projdag::commands::Outcome;
use projdag::config::ConfigFile;
use projdag::errors::{ErrorKind, Result};
use projdag::fs::mock::MockFileSystem;
use projdag::model::{EdgeKind, NodeKind};
use projdag::run_with_store;
use projdag::storage::GraphStore;

const GRAPH: &str = "/plans/graph.json";

/// A CLI session against an in-memory graph file.
struct Session {
    fs: MockFileSystem,
    cfg: ConfigFile,
}

impl Session {
    fn new() -> Self {
        common::init_tracing();
        Self {
            fs: MockFileSystem::new(),
            cfg: ConfigFile::default(),
        }
    }

    fn store(&self) -> GraphStore<MockFileSystem> {
        GraphStore::with_fs(self.fs.clone(), GRAPH)
    }

    fn parse(args: &[&str]) -> Command {
        let argv = std::iter::once("projdag").chain(args.iter().copied());
        CliArgs::try_parse_from(argv)
            .unwrap_or_else(|e| panic!("parsing {args:?}: {e}"))
            .command
    }

    fn try_run(&self, args: &[&str]) -> Result<Outcome> {
        run_with_store(&Self::parse(args), &self.store(), &self.cfg)
    }

    fn run(&self, args: &[&str]) -> String {
        self.try_run(args)
            .unwrap_or_else(|e| panic!("running {args:?}: {e}"))
            .output
    }

    /// Run `add` and return the printed id.
    fn add(&self, args: &[&str]) -> String {
        let mut full = vec!["add"];
        full.extend_from_slice(args);
        self.run(&full).trim().to_string()
    }
}

#[test]
fn add_link_and_order_persist_between_invocations() {
    let s = Session::new();
    let e1 = s.add(&["epic", "Auth"]);
    let e2 = s.add(&["epic", "Billing", "--points", "8"]);

    s.run(&["link", &e2, &e1]);

    let order = s.run(&["order"]);
    let auth = order.find("Auth").unwrap();
    let billing = order.find("Billing").unwrap();
    assert!(auth < billing);

    let graph = s.store().load().unwrap();
    assert_eq!(graph.node_count(), 2);
    assert!(graph.has_edge(e2.parse().unwrap(), e1.parse().unwrap(), EdgeKind::DependsOn));
}

#[test]
fn queries_do_not_rewrite_the_file() {
    let s = Session::new();
    s.add(&["spec", "Plan"]);
    let before = s.fs.contents(GRAPH).unwrap();

    let queries: [&[&str]; 5] = [&["order"], &["list"], &["validate"], &["schedule"], &["view", "gantt"]];
    for query in queries {
        let outcome = s.try_run(query).unwrap();
        assert!(!outcome.modified, "{query:?} reported a modification");
    }
    assert_eq!(s.fs.contents(GRAPH).unwrap(), before);
}

#[test]
fn cyclic_link_fails_with_cycle_exit_code_and_leaves_file_alone() {
    let s = Session::new();
    let a = s.add(&["user-story", "a"]);
    let b = s.add(&["user-story", "b"]);
    s.run(&["link", &a, &b, "--kind", "blocked-by"]);
    let before = s.fs.contents(GRAPH).unwrap();

    let err = s.try_run(&["link", &b, &a]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CycleDetected);
    assert_eq!(err.exit_code(), 3);
    assert_eq!(s.fs.contents(GRAPH).unwrap(), before);
}

#[test]
fn nodes_can_be_addressed_by_prefix() {
    let s = Session::new();
    let id = s.add(&["epic", "Search"]);

    let shown = s.run(&["show", &id[..8]]);
    assert!(shown.contains("name:      Search"));
    assert!(shown.contains("points:    0"));

    s.run(&["set-points", &id[..8], "5"]);
    let shown = s.run(&["show", &id]);
    assert!(shown.contains("points:    5"));
}

#[test]
fn add_with_parent_and_attributes() {
    let s = Session::new();
    let spec = s.add(&["spec", "Roadmap"]);
    let project = s.add(&[
        "project",
        "Mobile",
        "--parent",
        &spec,
        "--owner",
        "cy",
        "--participant",
        "ana",
        "--participant",
        "bo",
    ]);

    let graph = s.store().load().unwrap();
    let node = graph.get(project.parse().unwrap()).unwrap();
    assert_eq!(node.kind(), NodeKind::Project);
    assert_eq!(node.parent(), Some(spec.parse().unwrap()));
    assert_eq!(node.owner(), Some("cy"));
    assert_eq!(node.participants().unwrap().len(), 2);

    let shown = s.run(&["show", &project]);
    assert!(shown.contains("Roadmap"));
    assert!(shown.contains("-> part-of"));
}

#[test]
fn add_rejects_attributes_that_do_not_fit_the_kind() {
    let s = Session::new();
    let err = s.try_run(&["add", "spec", "Plan", "--points", "3"]).unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert!(s.fs.contents(GRAPH).is_none());
}

#[test]
fn timeline_by_end_or_duration() {
    let s = Session::new();
    let a = s.add(&["epic", "a", "--start", "2025-01-01", "--end", "2025-01-08", "--hours", "40"]);
    let b = s.add(&["epic", "b", "--start", "2025-01-05", "--duration", "3d"]);

    let graph = s.store().load().unwrap();
    let a_tl = *graph.get(a.parse().unwrap()).unwrap().timeline().unwrap();
    let b_tl = *graph.get(b.parse().unwrap()).unwrap().timeline().unwrap();
    assert_eq!(a_tl.estimated_hours(), 40);
    assert_eq!(b_tl.end(), common::day(8));

    let err = s.try_run(&["add", "epic", "c", "--start", "2025-01-01"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);

    let err = s
        .try_run(&["set-timeline", &a, "--start", "2025-01-09", "--end", "2025-01-02"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);

    s.run(&["clear-timeline", &a]);
    let graph = s.store().load().unwrap();
    assert!(graph.get(a.parse().unwrap()).unwrap().timeline().is_none());
}

#[test]
fn schedule_reports_dependency_conflict() {
    let s = Session::new();
    let dep = s.add(&["epic", "Foundation", "--start", "2025-01-01", "--end", "2025-01-08"]);
    let late = s.add(&["epic", "Walls", "--start", "2025-01-05", "--end", "2025-01-10"]);
    s.run(&["link", &late, &dep]);

    let out = s.run(&["schedule"]);
    assert!(out.contains("conflicts (1):"));
    assert!(out.contains("Walls starts 2025-01-05 but its dependencies end 2025-01-08"));
}

#[test]
fn assign_and_swimlane() {
    let s = Session::new();
    let story = s.add(&["user-story", "Login form", "--points", "3"]);
    s.add(&["user-story", "Logout"]);
    s.run(&["assign", &story, "ana"]);

    let out = s.run(&["view", "swimlane"]);
    assert!(out.contains("== @ana (1)"));
    assert!(out.contains("== unassigned (1)"));

    s.run(&["assign", &story]);
    let out = s.run(&["view", "swimlane"]);
    assert!(out.contains("== unassigned (2)"));
}

#[test]
fn remove_and_unlink() {
    let s = Session::new();
    let a = s.add(&["epic", "a"]);
    let b = s.add(&["epic", "b"]);
    s.run(&["link", &a, &b]);

    let err = s.try_run(&["unlink", &a, &b, "--kind", "part-of"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    s.run(&["unlink", &a, &b]);
    s.run(&["remove", &b]);

    let graph = s.store().load().unwrap();
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);

    let err = s.try_run(&["remove", &b]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn list_filters_by_kind_and_critical_path_prints_total() {
    let s = Session::new();
    let a = s.add(&["epic", "a", "--start", "2025-01-01", "--end", "2025-01-02", "--hours", "8"]);
    let b = s.add(&["epic", "b", "--start", "2025-01-02", "--end", "2025-01-04", "--hours", "16"]);
    s.add(&["spec", "plan"]);
    s.run(&["link", &b, &a]);

    let listed = s.run(&["list", "--kind", "epic"]);
    assert_eq!(listed.lines().count(), 2);

    let out = s.run(&["critical-path"]);
    assert!(out.starts_with("critical path: 24h"));
}

#[test]
fn set_changes_name_owner_and_link() {
    let s = Session::new();
    let epic = s.add(&["epic", "draft", "--owner", "ana"]);

    let out = s.run(&["set", &epic, "--name", "Checkout", "--link", "https://tracker/7"]);
    assert!(out.contains("Checkout"));

    let graph = s.store().load().unwrap();
    let node = graph.get(epic.parse().unwrap()).unwrap();
    assert_eq!(node.name(), "Checkout");
    assert_eq!(node.owner(), Some("ana"));
    assert_eq!(node.link(), Some("https://tracker/7"));

    s.run(&["set", &epic, "--owner", ""]);
    let graph = s.store().load().unwrap();
    assert_eq!(graph.get(epic.parse().unwrap()).unwrap().owner(), None);

    let err = s.try_run(&["set", &epic]).unwrap_err();
    assert_eq!(err.exit_code(), 4);
}
