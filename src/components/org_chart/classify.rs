use std::collections::HashMap;

use super::types::{Employee, EmployeeId};

/// Size class of a node, from its position in the reporting hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
	/// No manager.
	Root,
	/// Manages people and reports directly to a root.
	SeniorManager,
	/// Manages people further down.
	Manager,
	/// No direct reports.
	Leaf,
}

impl SizeClass {
	/// Multiplier applied to the base node radius.
	pub fn multiplier(self) -> f64 {
		match self {
			SizeClass::Root => 1.6,
			SizeClass::SeniorManager => 1.5,
			SizeClass::Manager => 1.2,
			SizeClass::Leaf => 1.0,
		}
	}
}

/// Classifies every employee. Computed from the whole list because a node's
/// class depends on who reports to it and on its manager's own manager.
///
/// A manager reference that resolves to nobody still counts as "has a
/// manager", but never qualifies the node as a senior manager.
pub fn classify(employees: &[Employee]) -> Vec<SizeClass> {
	let mut by_id: HashMap<&EmployeeId, usize> = HashMap::with_capacity(employees.len());
	for (i, e) in employees.iter().enumerate() {
		by_id.entry(&e.id).or_insert(i);
	}

	// Reports are counted per identifier, so duplicate ids share their reports.
	let mut reports: HashMap<&EmployeeId, Vec<usize>> = HashMap::new();
	for (i, e) in employees.iter().enumerate() {
		if let Some(manager) = e.manager_id() {
			reports.entry(manager).or_default().push(i);
		}
	}

	employees
		.iter()
		.enumerate()
		.map(|(i, e)| {
			let Some(manager_id) = e.manager_id() else {
				return SizeClass::Root;
			};
			let has_reports = reports
				.get(&e.id)
				.is_some_and(|r| r.iter().any(|&report| report != i));
			if !has_reports {
				return SizeClass::Leaf;
			}
			let manager_is_root = by_id
				.get(manager_id)
				.is_some_and(|&m| employees[m].manager.is_none());
			if manager_is_root {
				SizeClass::SeniorManager
			} else {
				SizeClass::Manager
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn multipliers(employees: &[Employee]) -> Vec<f64> {
		classify(employees).into_iter().map(SizeClass::multiplier).collect()
	}

	#[test]
	fn roots_are_largest_regardless_of_reports() {
		let employees = vec![Employee::new(1, "Solo"), Employee::new(2, "Other Root")];
		assert_eq!(multipliers(&employees), vec![1.6, 1.6]);
	}

	#[test]
	fn chain_of_three() {
		let employees = vec![
			Employee::new(1, "Alice"),
			Employee::new(2, "Bob").reporting_to(1),
			Employee::new(3, "Carol").reporting_to(2),
		];
		assert_eq!(multipliers(&employees), vec![1.6, 1.5, 1.0]);
	}

	#[test]
	fn manager_gaining_a_manager_demotes_report() {
		let mut employees = vec![
			Employee::new(1, "Alice"),
			Employee::new(2, "Bob").reporting_to(1),
			Employee::new(3, "Carol").reporting_to(2),
			Employee::new(4, "Dan").reporting_to(3),
		];
		assert_eq!(classify(&employees)[1], SizeClass::SeniorManager);
		assert_eq!(classify(&employees)[2], SizeClass::Manager);

		// Alice now reports to someone, so Bob's manager is no longer a root.
		employees.insert(0, Employee::new(0, "Zed"));
		employees[1] = Employee::new(1, "Alice").reporting_to(0);
		let classes = classify(&employees);
		assert_eq!(classes[1], SizeClass::SeniorManager);
		assert_eq!(classes[2].multiplier(), 1.2);
	}

	#[test]
	fn direct_report_of_root_without_reports_is_leaf() {
		let employees = vec![Employee::new(1, "Alice"), Employee::new(2, "Bob").reporting_to(1)];
		assert_eq!(multipliers(&employees), vec![1.6, 1.0]);
	}

	#[test]
	fn dangling_manager_is_never_senior() {
		let employees = vec![
			Employee::new(2, "Bob").reporting_to(99),
			Employee::new(3, "Carol").reporting_to(2),
		];
		assert_eq!(classify(&employees), vec![SizeClass::Manager, SizeClass::Leaf]);
	}

	#[test]
	fn self_reference_is_not_a_direct_report() {
		let employees = vec![Employee::new(1, "Alice"), Employee::new(2, "Loop").reporting_to(2)];
		assert_eq!(classify(&employees)[1], SizeClass::Leaf);
	}

	#[test]
	fn string_and_numeric_ids_do_not_mix() {
		let employees = vec![Employee::new(1, "Alice"), Employee::new("1", "Bob").reporting_to("1")];
		// Bob points at himself by string id; Alice has no reports.
		assert_eq!(classify(&employees), vec![SizeClass::Root, SizeClass::Leaf]);
	}
}
