//! Grouping nodes by an attribute, coloring groups, and building the legend.

use super::types::{Employee, OrgNode};

/// d3 `category10`.
pub const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// d3 `category20`.
pub const CATEGORY20: &[&str] = &[
	"#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
	"#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
	"#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Attribute used to partition nodes for coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupMode {
	/// Everyone in one group.
	#[default]
	None,
	/// By department.
	Department,
	/// By `"{city}, {state}"`.
	Location,
}

impl GroupMode {
	/// Mode selected by the two grouping checkboxes. Department wins when both
	/// are checked; neither checked means no grouping.
	pub fn from_controls(department: bool, location: bool) -> Self {
		if department {
			GroupMode::Department
		} else if location {
			GroupMode::Location
		} else {
			GroupMode::None
		}
	}

	/// Group label of one employee under this mode.
	pub fn label(self, employee: &Employee) -> String {
		match self {
			GroupMode::None => String::new(),
			GroupMode::Department => employee.department.clone().unwrap_or_default(),
			GroupMode::Location => {
				location_label(employee.city.as_deref(), employee.state.as_deref())
			}
		}
	}
}

/// `"Seattle, WA"`; without a city the comma is dropped but the space stays
/// (`" WA"`, or `" "` when both are missing).
pub fn location_label(city: Option<&str>, state: Option<&str>) -> String {
	let city = city.unwrap_or_default();
	let state = state.unwrap_or_default();
	if city.is_empty() {
		format!(" {state}")
	} else {
		format!("{city}, {state}")
	}
}

/// One legend row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
	/// Group label.
	pub label: String,
	/// Swatch color.
	pub color: &'static str,
}

/// Ordinal color scale: labels get palette entries in order of first
/// appearance, wrapping around when the palette runs out.
#[derive(Clone, Debug)]
struct OrdinalScale {
	palette: &'static [&'static str],
	domain: Vec<String>,
}

impl OrdinalScale {
	fn new(palette: &'static [&'static str]) -> Self {
		Self {
			palette,
			domain: Vec::new(),
		}
	}

	fn color(&mut self, label: &str) -> &'static str {
		let position = match self.domain.iter().position(|d| d == label) {
			Some(p) => p,
			None => {
				self.domain.push(label.to_string());
				self.domain.len() - 1
			}
		};
		self.palette[position % self.palette.len()]
	}
}

/// Result of grouping the current node set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grouping {
	/// Group label per node.
	pub labels: Vec<String>,
	/// Group color per node.
	pub colors: Vec<&'static str>,
	/// Distinct groups sorted by label.
	pub legend: Vec<LegendEntry>,
}

impl Grouping {
	/// Groups `nodes` under `mode`. Over ten distinct labels switches to the
	/// twenty-color palette. The same mode over the same nodes always yields
	/// the same colors.
	pub fn compute(nodes: &[OrgNode], mode: GroupMode) -> Self {
		let labels: Vec<String> = nodes.iter().map(|n| mode.label(&n.employee)).collect();

		let mut distinct: Vec<&str> = Vec::new();
		for label in &labels {
			if !distinct.contains(&label.as_str()) {
				distinct.push(label.as_str());
			}
		}
		let palette = if distinct.len() > 10 { CATEGORY20 } else { CATEGORY10 };

		let mut scale = OrdinalScale::new(palette);
		let colors: Vec<&'static str> = labels.iter().map(|l| scale.color(l)).collect();

		let mut legend: Vec<LegendEntry> = distinct
			.iter()
			.map(|&label| LegendEntry {
				label: label.to_string(),
				color: scale.color(label),
			})
			.collect();
		legend.sort_by(|a, b| a.label.cmp(&b.label));

		Self {
			labels,
			colors,
			legend,
		}
	}

	/// Palette the colors were drawn from.
	pub fn palette_size(&self) -> usize {
		if self.legend.len() > 10 {
			CATEGORY20.len()
		} else {
			CATEGORY10.len()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::org_chart::hierarchy::HierarchyModel;

	fn located(id: i32, city: Option<&str>, state: Option<&str>) -> Employee {
		Employee {
			city: city.map(str::to_string),
			state: state.map(str::to_string),
			..Employee::new(id, "Someone")
		}
	}

	fn in_department(id: i32, department: &str) -> Employee {
		Employee {
			department: Some(department.to_string()),
			..Employee::new(id, "Someone")
		}
	}

	fn nodes(employees: &[Employee]) -> Vec<OrgNode> {
		HierarchyModel::build(employees).nodes
	}

	#[test]
	fn location_label_formats() {
		assert_eq!(location_label(Some("Seattle"), Some("WA")), "Seattle, WA");
		assert_eq!(location_label(Some(""), Some("WA")), " WA");
		assert_eq!(location_label(None, Some("WA")), " WA");
		assert_eq!(location_label(Some(""), Some("")), " ");
		assert_eq!(location_label(None, None), " ");
		assert_eq!(location_label(Some("Austin"), None), "Austin, ");
	}

	#[test]
	fn controls_map_to_modes() {
		assert_eq!(GroupMode::from_controls(false, false), GroupMode::None);
		assert_eq!(GroupMode::from_controls(true, false), GroupMode::Department);
		assert_eq!(GroupMode::from_controls(false, true), GroupMode::Location);
		assert_eq!(GroupMode::from_controls(true, true), GroupMode::Department);
	}

	#[test]
	fn no_grouping_is_a_single_empty_group() {
		let nodes = nodes(&[in_department(1, "Sales"), in_department(2, "Ops")]);
		let grouping = Grouping::compute(&nodes, GroupMode::None);
		assert_eq!(grouping.labels, vec!["", ""]);
		assert_eq!(grouping.colors, vec![CATEGORY10[0], CATEGORY10[0]]);
		assert_eq!(grouping.legend.len(), 1);
	}

	#[test]
	fn ten_groups_use_category10() {
		let employees: Vec<_> = (0..10).map(|i| in_department(i, &format!("D{i}"))).collect();
		let grouping = Grouping::compute(&nodes(&employees), GroupMode::Department);
		assert_eq!(grouping.palette_size(), 10);
		assert!(grouping.colors.iter().all(|c| CATEGORY10.contains(c)));
		assert_eq!(grouping.colors[1], CATEGORY10[1]);
	}

	#[test]
	fn eleven_groups_use_category20() {
		let employees: Vec<_> = (0..11).map(|i| in_department(i, &format!("D{i}"))).collect();
		let grouping = Grouping::compute(&nodes(&employees), GroupMode::Department);
		assert_eq!(grouping.palette_size(), 20);
		assert_eq!(grouping.colors[1], CATEGORY20[1]);
		assert_eq!(grouping.colors[10], CATEGORY20[10]);
	}

	#[test]
	fn regrouping_is_color_stable() {
		let employees = vec![
			in_department(1, "Sales"),
			in_department(2, "Engineering"),
			in_department(3, "Sales"),
			in_department(4, "Legal"),
		];
		let nodes = nodes(&employees);
		let first = Grouping::compute(&nodes, GroupMode::Department);
		let _ = Grouping::compute(&nodes, GroupMode::Location);
		let second = Grouping::compute(&nodes, GroupMode::Department);
		assert_eq!(first, second);
		assert_eq!(first.colors[0], first.colors[2]);
	}

	#[test]
	fn legend_is_sorted_and_distinct() {
		let employees = vec![
			located(1, Some("Seattle"), Some("WA")),
			located(2, Some("Austin"), Some("TX")),
			located(3, Some("Seattle"), Some("WA")),
			located(4, None, Some("OR")),
		];
		let grouping = Grouping::compute(&nodes(&employees), GroupMode::Location);
		let labels: Vec<_> = grouping.legend.iter().map(|e| e.label.as_str()).collect();
		assert_eq!(labels, vec![" OR", "Austin, TX", "Seattle, WA"]);

		let seattle = grouping.legend.iter().find(|e| e.label == "Seattle, WA");
		assert_eq!(seattle.map(|e| e.color), Some(CATEGORY10[0]));
	}
}
