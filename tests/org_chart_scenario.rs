use std::sync::Arc;

use org_chart_graph::components::org_chart::grouping::{CATEGORY10, CATEGORY20};
use org_chart_graph::components::org_chart::layout::NodePosition;
use org_chart_graph::components::org_chart::{
	GraphConfig, GroupMode, HierarchyModel, OrgEdge, OrgGraphState,
};
use org_chart_graph::directory::parse_users;
use org_chart_graph::images::TemplateImageRetriever;

const DIRECTORY: &str = r#"[
	{"id": 1, "displayName": "Alice", "manager": null},
	{"id": 2, "displayName": "Bob", "manager": {"id": 1}},
	{"id": 3, "displayName": "Carol", "manager": {"id": 2}}
]"#;

#[test]
fn three_level_chain() {
	let users = parse_users("/api/users", DIRECTORY).expect("directory parses");
	let model = HierarchyModel::build(&users);

	assert_eq!(
		model.edges,
		vec![OrgEdge { source: 1, target: 0 }, OrgEdge { source: 2, target: 1 }]
	);
	let radii: Vec<_> = model.nodes.iter().map(|n| n.radius_multiplier).collect();
	assert_eq!(radii, vec![1.6, 1.5, 1.0]);
}

fn office(n: usize) -> String {
	let offices: Vec<String> = (0..n)
		.map(|i| {
			format!(
				r#"{{"id": {i}, "displayName": "Person {i}", "department": "Dept {i}",
				"city": "City {}", "state": "ST", "email": "p{i}@corp.test"}}"#,
				i % 3
			)
		})
		.collect();
	format!("[{}]", offices.join(","))
}

#[test]
fn palette_follows_group_count() {
	let small = parse_users("/u", &office(10)).expect("parses");
	let mut state = OrgGraphState::new(&small, GraphConfig::default(), Arc::new(TemplateImageRetriever::new("")));
	state.regroup(GroupMode::Department);
	assert!(state.views.iter().all(|v| CATEGORY10.contains(&v.color)));
	state.regroup(GroupMode::Location);
	assert_eq!(state.legend.len(), 3);

	let large = parse_users("/u", &office(11)).expect("parses");
	let mut state = OrgGraphState::new(&large, GraphConfig::default(), Arc::new(TemplateImageRetriever::new("")));
	state.regroup(GroupMode::Department);
	let colors: Vec<_> = state.views.iter().map(|v| v.color).collect();
	assert_eq!(colors, CATEGORY20[..11].to_vec());
	state.regroup(GroupMode::Department);
	let again: Vec<_> = state.views.iter().map(|v| v.color).collect();
	assert_eq!(colors, again);
}

#[test]
fn search_select_and_clamp_together() {
	let users = parse_users("/u", &office(5)).expect("parses");
	let images = Arc::new(TemplateImageRetriever::new("/photos/{user}.jpg"));
	let mut state = OrgGraphState::new(&users, GraphConfig::default(), images);

	let update = state.search("dept 4");
	let panel = update.selected.expect("unique match selected");
	assert_eq!(panel.name, "Person 4");
	assert_eq!(panel.location, "City 1, ST");
	assert_eq!(panel.mailto, "mailto:p4@corp.test");
	assert_eq!(panel.photo_url.as_deref(), Some("/photos/p4.jpg"));
	assert_eq!(state.views.iter().filter(|v| v.non_match).count(), 4);

	state.on_positions(&[NodePosition { index: 4, x: 5000.0, y: -5000.0 }]);
	// Roots (no manager) render at 1.6x the base radius.
	assert_eq!(state.layouts[4].x, 1000.0 - 24.0);
	assert_eq!(state.layouts[4].y, 24.0);

	let cleared = state.search("");
	assert_eq!(cleared.readout.as_deref(), Some(""));
	assert!(state.views.iter().all(|v| !v.non_match));
}
