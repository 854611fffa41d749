mod common;

use common::{day, timeline};
use projdag::dag::ProjectGraph;
use projdag::errors::{ErrorKind, ProjdagError};
use projdag::model::{Duration, NodeKind, NodeSpec, Timeline};

#[test]
fn points_only_apply_to_epics_and_stories() {
    let mut graph = ProjectGraph::new();
    let epic = graph.add_node(NodeKind::Epic, "epic");
    let story = graph.add_node(NodeKind::UserStory, "story");
    let project = graph.add_node(NodeKind::Project, "project");

    assert_eq!(graph.get(epic).unwrap().points(), Some(0));
    graph.set_points(epic, 8).unwrap();
    graph.set_points(story, 3).unwrap();
    assert_eq!(graph.get(epic).unwrap().points(), Some(8));
    assert_eq!(graph.get(story).unwrap().points(), Some(3));

    let err = graph.set_points(project, 5).unwrap_err();
    assert!(matches!(err, ProjdagError::InvalidAttribute { id: Some(id), .. } if id == project));
    assert_eq!(graph.get(project).unwrap().points(), None);
}

#[test]
fn only_stories_can_be_assigned() {
    let mut graph = ProjectGraph::new();
    let story = graph.add_node(NodeKind::UserStory, "story");
    let epic = graph.add_node(NodeKind::Epic, "epic");

    graph.set_assignee(story, Some("ana".into())).unwrap();
    assert_eq!(graph.get(story).unwrap().assignee(), Some("ana"));
    graph.set_assignee(story, None).unwrap();
    assert_eq!(graph.get(story).unwrap().assignee(), None);

    let err = graph.set_assignee(epic, Some("ana".into())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);
}

#[test]
fn node_spec_rejects_inapplicable_attributes() {
    let mut graph = ProjectGraph::new();

    let err = graph
        .insert(NodeSpec::new(NodeKind::Spec, "spec").with_points(3))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);

    let err = graph
        .insert(NodeSpec::new(NodeKind::Epic, "epic").with_assignee("bo"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);

    let err = graph
        .insert(NodeSpec::new(NodeKind::UserStory, "story").with_participant("bo"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);

    assert!(graph.is_empty());
}

#[test]
fn node_spec_carries_every_attribute() {
    let mut graph = ProjectGraph::new();
    let id = graph
        .insert(
            NodeSpec::new(NodeKind::Epic, "billing")
                .with_points(13)
                .with_owner("cy")
                .with_link("https://tracker.example/EPIC-1")
                .with_participant("ana")
                .with_participant("bo")
                .with_timeline(timeline(1, 10, 40)),
        )
        .unwrap();

    let node = graph.get(id).unwrap();
    assert_eq!(node.name(), "billing");
    assert_eq!(node.points(), Some(13));
    assert_eq!(node.owner(), Some("cy"));
    assert_eq!(node.link(), Some("https://tracker.example/EPIC-1"));
    let people: Vec<&str> = node
        .participants()
        .unwrap()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(people, vec!["ana", "bo"]);
    assert_eq!(node.timeline().unwrap().estimated_hours(), 40);
}

#[test]
fn participants_can_be_added_and_removed() {
    let mut graph = ProjectGraph::new();
    let project = graph.add_node(NodeKind::Project, "project");

    graph.update(project, |n| n.add_participant("ana")).unwrap();
    graph.update(project, |n| n.remove_participant("ana")).unwrap();
    assert!(graph.get(project).unwrap().participants().unwrap().is_empty());

    let err = graph
        .update(project, |n| n.remove_participant("ana"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttribute);
}

#[test]
fn timeline_requires_start_not_after_end() {
    let err = Timeline::new(day(10), day(5), 8).unwrap_err();
    assert!(matches!(err, ProjdagError::InvalidAttribute { id: None, .. }));

    let zero = Timeline::new(day(3), day(3), 0).unwrap();
    assert_eq!(zero.start(), zero.end());
}

#[test]
fn timelines_can_be_set_and_cleared() {
    let mut graph = ProjectGraph::new();
    let epic = graph.add_node(NodeKind::Epic, "epic");

    graph.set_timeline(epic, timeline(1, 4, 12)).unwrap();
    assert_eq!(graph.get(epic).unwrap().timeline(), Some(&timeline(1, 4, 12)));

    let previous = graph.clear_timeline(epic).unwrap();
    assert_eq!(previous, Some(timeline(1, 4, 12)));
    assert!(graph.get(epic).unwrap().timeline().is_none());
    assert_eq!(graph.clear_timeline(epic).unwrap(), None);
}

#[test]
fn timeline_from_duration() {
    let tl = Timeline::from_start_duration(day(1), Duration::Days(3), 20).unwrap();
    assert_eq!(tl.end(), day(4));
    assert_eq!(tl.duration(), Duration::Days(3));

    let tl = Timeline::from_start_duration(day(1), Duration::Weeks(2), 0).unwrap();
    assert_eq!(tl.end(), day(15));
}

#[test]
fn duration_between_rounds_up_to_coarsest_unit() {
    let start = day(1);
    assert_eq!(
        Duration::between(&start, &(start + chrono::Duration::minutes(90))),
        Duration::Hours(2)
    );
    assert_eq!(Duration::between(&start, &day(2)), Duration::Hours(24));
    assert_eq!(
        Duration::between(&start, &(day(2) + chrono::Duration::hours(1))),
        Duration::Days(2)
    );
    assert_eq!(Duration::between(&start, &day(8)), Duration::Days(7));
    assert_eq!(Duration::between(&start, &day(9)), Duration::Weeks(2));
    assert_eq!(Duration::between(&day(5), &day(1)), Duration::Hours(0));
}

#[test]
fn duration_parses_short_forms() {
    assert_eq!("5h".parse::<Duration>().unwrap(), Duration::Hours(5));
    assert_eq!("3D".parse::<Duration>().unwrap(), Duration::Days(3));
    assert_eq!(" 2w ".parse::<Duration>().unwrap(), Duration::Weeks(2));
    assert!("".parse::<Duration>().is_err());
    assert!("3m".parse::<Duration>().is_err());
    assert!("xd".parse::<Duration>().is_err());
    assert_eq!(Duration::Days(4).to_string(), "4d");
}

#[test]
fn kinds_parse_leniently() {
    assert_eq!("user_story".parse::<NodeKind>().unwrap(), NodeKind::UserStory);
    assert_eq!("SubProject".parse::<NodeKind>().unwrap(), NodeKind::SubProject);
    assert_eq!(NodeKind::SubProject.to_string(), "sub-project");
    assert!("task".parse::<NodeKind>().is_err());
}

#[test]
fn name_owner_and_link_can_be_changed() {
    let mut graph = ProjectGraph::new();
    let project = graph.add_node(NodeKind::Project, "draft");

    graph.rename(project, "Roadmap").unwrap();
    graph.set_owner(project, Some("cy".into())).unwrap();
    graph.set_link(project, Some("https://tracker/42".into())).unwrap();
    let node = graph.get(project).unwrap();
    assert_eq!(node.name(), "Roadmap");
    assert_eq!(node.owner(), Some("cy"));
    assert_eq!(node.link(), Some("https://tracker/42"));

    graph.set_owner(project, None).unwrap();
    graph.set_link(project, None).unwrap();
    let node = graph.get(project).unwrap();
    assert_eq!(node.owner(), None);
    assert_eq!(node.link(), None);

    let gone = projdag::model::NodeId::new();
    assert_eq!(graph.rename(gone, "x").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn rejected_insert_reports_no_node_id() {
    let mut graph = ProjectGraph::new();
    let spec = graph.add_node(NodeKind::Spec, "spec");

    let rejected = [
        NodeSpec::new(NodeKind::Spec, "spec").with_points(3),
        NodeSpec::new(NodeKind::Epic, "epic").with_assignee("bo"),
        NodeSpec::new(NodeKind::UserStory, "story").with_participant("bo"),
        NodeSpec::new(NodeKind::Epic, "epic").with_parent(spec),
        NodeSpec::new(NodeKind::SubProject, "sub").with_parent(spec),
    ];
    for node_spec in rejected {
        let err = graph.insert(node_spec).unwrap_err();
        assert!(
            matches!(err, ProjdagError::InvalidAttribute { id: None, .. }),
            "unexpected error {err:?}"
        );
    }
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.next_seq(), 1);
}
