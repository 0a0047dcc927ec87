use std::collections::HashMap;

use log::warn;

use super::abbreviation::name_abbreviation;
use super::classify::classify;
use super::types::{Employee, EmployeeId, OrgEdge, OrgNode};

/// A manager reference that did not resolve to any employee in the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingManager {
	/// Index of the employee holding the reference.
	pub employee: usize,
	/// The unresolved manager id.
	pub manager: EmployeeId,
}

/// Nodes and edges derived from one directory snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchyModel {
	/// One node per employee, in input order.
	pub nodes: Vec<OrgNode>,
	/// Report → manager edges.
	pub edges: Vec<OrgEdge>,
	/// References dropped while building `edges`.
	pub dangling: Vec<DanglingManager>,
}

impl HierarchyModel {
	/// Builds the graph model from a flat, self-referencing employee list.
	///
	/// Duplicate identifiers resolve to their first occurrence.
	pub fn build(employees: &[Employee]) -> Self {
		let mut by_id: HashMap<&EmployeeId, usize> = HashMap::with_capacity(employees.len());
		for (i, e) in employees.iter().enumerate() {
			by_id.entry(&e.id).or_insert(i);
		}

		let mut edges = Vec::new();
		let mut dangling = Vec::new();
		for (i, e) in employees.iter().enumerate() {
			let Some(manager) = e.manager_id() else {
				continue;
			};
			match by_id.get(manager) {
				Some(&target) => edges.push(OrgEdge { source: i, target }),
				None => {
					warn!("Missing manager for {} ({}) in data.", e.name(), e.id);
					dangling.push(DanglingManager {
						employee: i,
						manager: manager.clone(),
					});
				}
			}
		}

		let nodes = employees
			.iter()
			.zip(classify(employees))
			.map(|(e, class)| OrgNode {
				employee: e.clone(),
				radius_multiplier: class.multiplier(),
				abbreviation: name_abbreviation(e.name()),
			})
			.collect();

		Self {
			nodes,
			edges,
			dangling,
		}
	}
}
