mod common;

use common::day;
use projdag::config::ViewSection;
use projdag::model::NodeKind;
use projdag::render;
use projdag::views::{LaneKey, gantt, swimlane};
use projdag_test_utils::builders::GraphBuilder;

#[test]
fn swimlane_groups_stories_by_assignee_and_others_by_kind() {
    let (graph, ids) = GraphBuilder::new()
        .node("epic", NodeKind::Epic)
        .story("s1", 3, Some("ana"))
        .story("s2", 2, None)
        .story("s3", 5, Some("ana"))
        .story("s4", 1, Some("bo"))
        .part_of("s1", "epic")
        .build_with_ids();
    let order = graph.topological_order().unwrap();

    let lanes = swimlane(&graph, &order);
    let keys: Vec<LaneKey> = lanes.iter().map(|l| l.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            LaneKey::Kind(NodeKind::Epic),
            LaneKey::Assignee("ana".into()),
            LaneKey::Unassigned,
            LaneKey::Assignee("bo".into()),
        ]
    );

    let ana: Vec<_> = lanes[1].rows.iter().map(|r| r.id).collect();
    assert_eq!(ana, ids.all(&["s1", "s3"]));
    assert_eq!(lanes[1].rows[0].points, Some(3));
    assert_eq!(lanes[0].rows[0].kind, NodeKind::Epic);
}

#[test]
fn swimlane_follows_the_given_order() {
    let (graph, ids) = GraphBuilder::new()
        .story("first", 1, Some("ana"))
        .story("second", 1, Some("ana"))
        .build_with_ids();

    let reversed = ids.all(&["second", "first"]);
    let lanes = swimlane(&graph, &reversed);
    let rows: Vec<_> = lanes[0].rows.iter().map(|r| r.id).collect();
    assert_eq!(rows, reversed);
}

#[test]
fn gantt_lists_only_scheduled_nodes() {
    let (graph, ids) = GraphBuilder::new()
        .node("a", NodeKind::Epic)
        .node("b", NodeKind::Epic)
        .node("c", NodeKind::Epic)
        .depends_on("b", "a")
        .scheduled("a", 1, 4, 16)
        .scheduled("c", 2, 3, 4)
        .build_with_ids();
    let order = graph.topological_order().unwrap();

    let rows = gantt(&graph, &order);
    let listed: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(listed, ids.all(&["a", "c"]));
    assert_eq!(rows[0].start, day(1));
    assert_eq!(rows[0].end, day(4));
    assert_eq!(rows[0].estimated_hours, 16);
}

#[test]
fn views_tolerate_unknown_ids() {
    let (graph, _) = common::scheduled_chain();
    let order = vec![projdag::model::NodeId::new()];

    assert!(swimlane(&graph, &order).is_empty());
    assert!(gantt(&graph, &order).is_empty());
}

#[test]
fn rendered_gantt_bars_fit_the_configured_width() {
    let (graph, _) = common::scheduled_chain();
    let order = graph.topological_order().unwrap();
    let view = ViewSection {
        gantt_width: 20,
        ..ViewSection::default()
    };

    let text = render::gantt(&gantt(&graph, &order), &view);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("2025-01-01 .. 2025-01-07"));

    for line in &lines[1..] {
        let bar = line.split('|').nth(1).unwrap();
        assert_eq!(bar.chars().count(), 20);
        assert!(bar.contains('#'));
    }
    // The first epic starts at the left edge, the last one ends at the right.
    assert!(lines[1].split('|').nth(1).unwrap().starts_with('#'));
    assert!(lines[3].split('|').nth(1).unwrap().ends_with('#'));
}

#[test]
fn rendered_gantt_of_nothing() {
    let graph = projdag::dag::ProjectGraph::new();
    let text = render::gantt(&gantt(&graph, &[]), &ViewSection::default());
    assert_eq!(text, "nothing scheduled\n");
}
