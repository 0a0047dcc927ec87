use std::fmt;

use serde::{Deserialize, Serialize};

/// Directory identifier. The directory may hand out numeric or string ids;
/// the two never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
	/// Numeric identifier.
	Number(i64),
	/// String identifier.
	Text(String),
}

impl fmt::Display for EmployeeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EmployeeId::Number(n) => write!(f, "{n}"),
			EmployeeId::Text(s) => f.write_str(s),
		}
	}
}

impl Default for EmployeeId {
	fn default() -> Self {
		EmployeeId::Number(0)
	}
}

impl From<i64> for EmployeeId {
	fn from(n: i64) -> Self {
		EmployeeId::Number(n)
	}
}

impl From<i32> for EmployeeId {
	fn from(n: i32) -> Self {
		EmployeeId::Number(n.into())
	}
}

impl From<&str> for EmployeeId {
	fn from(s: &str) -> Self {
		EmployeeId::Text(s.to_string())
	}
}

/// Reference from an employee to their manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRef {
	/// Manager's identifier.
	pub id: EmployeeId,
}

/// One directory entry, as served by the directory endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
	/// Identifier.
	pub id: EmployeeId,
	/// Display name.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Job title.
	#[serde(default)]
	pub job_title: Option<String>,
	/// Department.
	#[serde(default)]
	pub department: Option<String>,
	/// City.
	#[serde(default)]
	pub city: Option<String>,
	/// State.
	#[serde(default)]
	pub state: Option<String>,
	/// Desk phone.
	#[serde(default)]
	pub telephone_number: Option<String>,
	/// Mobile phone.
	#[serde(default)]
	pub mobile_number: Option<String>,
	/// Email address.
	#[serde(default)]
	pub email: Option<String>,
	/// Manager, `None` for the root(s) of the hierarchy.
	#[serde(default)]
	pub manager: Option<ManagerRef>,
}

impl Employee {
	/// Creates an employee with only an id and a display name set.
	pub fn new(id: impl Into<EmployeeId>, display_name: &str) -> Self {
		Self {
			id: id.into(),
			display_name: Some(display_name.to_string()),
			..Self::default()
		}
	}

	/// Sets the manager reference.
	pub fn reporting_to(mut self, manager: impl Into<EmployeeId>) -> Self {
		self.manager = Some(ManagerRef { id: manager.into() });
		self
	}

	/// Display name, or `""` when absent.
	pub fn name(&self) -> &str {
		self.display_name.as_deref().unwrap_or_default()
	}

	/// Manager identifier, if any.
	pub fn manager_id(&self) -> Option<&EmployeeId> {
		self.manager.as_ref().map(|m| &m.id)
	}
}

/// An employee placed in the graph, with its hierarchy-derived attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct OrgNode {
	/// Source record.
	pub employee: Employee,
	/// Visual weight, multiplied into the base radius.
	pub radius_multiplier: f64,
	/// On-canvas label.
	pub abbreviation: Option<String>,
}

/// Report → manager link, by position in the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrgEdge {
	/// Index of the report.
	pub source: usize,
	/// Index of the manager.
	pub target: usize,
}

/// Per-node paint state, produced by reconciliation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeView {
	/// Current group label.
	pub group: String,
	/// Fill color of the current group.
	pub color: &'static str,
	/// Holds the selection ring.
	pub selected: bool,
	/// Excluded by the current search.
	pub non_match: bool,
}
