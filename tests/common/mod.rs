#![allow(dead_code)]

use projdag::config::ConfigFile;
use projdag::model::NodeKind;
use projdag_test_utils::builders::{GraphBuilder, Ids};
use projdag::dag::ProjectGraph;

pub use projdag_test_utils::{day, init_tracing, timeline};

/// S (spec) <- P (project) via PartOf, plus epics E1 and E2 with
/// E2 depending on E1. Nodes are created in the order S, P, E1, E2.
pub fn spec_project_epics() -> (ProjectGraph, Ids) {
    GraphBuilder::new()
        .node("S", NodeKind::Spec)
        .node("P", NodeKind::Project)
        .node("E1", NodeKind::Epic)
        .node("E2", NodeKind::Epic)
        .part_of("P", "S")
        .depends_on("E2", "E1")
        .build_with_ids()
}

/// Three epics in a chain `C -> B -> A`, each scheduled back to back.
pub fn scheduled_chain() -> (ProjectGraph, Ids) {
    GraphBuilder::new()
        .node("A", NodeKind::Epic)
        .node("B", NodeKind::Epic)
        .node("C", NodeKind::Epic)
        .depends_on("B", "A")
        .depends_on("C", "B")
        .scheduled("A", 1, 3, 16)
        .scheduled("B", 3, 6, 24)
        .scheduled("C", 6, 7, 8)
        .build_with_ids()
}

pub fn default_config() -> ConfigFile {
    ConfigFile::default()
}

/// Position of `id` in `order`; panics if missing.
pub fn position(order: &[projdag::model::NodeId], id: projdag::model::NodeId) -> usize {
    order
        .iter()
        .position(|x| *x == id)
        .unwrap_or_else(|| panic!("{id} missing from order"))
}
