//! Force-directed org chart: hierarchy model, size classes, grouping,
//! search and selection, painted on a canvas.

/// Node labels.
pub mod abbreviation;
/// Node size classes.
pub mod classify;
mod component;
/// View configuration.
pub mod config;
pub mod grouping;
/// Employees to nodes and edges.
pub mod hierarchy;
/// Force simulation boundary.
pub mod layout;
mod render;
/// Query matching.
pub mod search;
/// Detail panel and selection flags.
pub mod selection;
/// Per-snapshot view state.
pub mod state;
/// Directory records and graph elements.
pub mod types;

pub use component::OrgChartCanvas;
pub use config::{ForceParameters, GraphConfig, SelectOn};
pub use grouping::{GroupMode, LegendEntry};
pub use hierarchy::HierarchyModel;
pub use selection::DetailPanel;
pub use state::OrgGraphState;
pub use types::{Employee, EmployeeId, ManagerRef, OrgEdge, OrgNode};
