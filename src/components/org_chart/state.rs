use std::sync::Arc;

use log::{debug, info};

use crate::images::ImageRetriever;

use super::config::GraphConfig;
use super::grouping::{GroupMode, Grouping, LegendEntry};
use super::hierarchy::HierarchyModel;
use super::layout::{ForceLayout, NodePosition};
use super::search::{SearchOutcome, search};
use super::selection::{DetailPanel, selection_flags};
use super::types::{Employee, NodeView};

/// Pixels the abbreviation sits below the node center.
pub const LABEL_OFFSET: f64 = 5.0;
/// Pointer travel (screen pixels) below which a press counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// Logical → screen mapping. The logical canvas is fitted into the element
/// with a uniform scale, anchored top-left.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Screen x offset.
	pub x: f64,
	/// Screen y offset.
	pub y: f64,
	/// Uniform scale.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is being pressed.
	pub active: bool,
	/// The pointer left the click slop.
	pub moved: bool,
	/// Pressed node.
	pub node_idx: Option<usize>,
	/// Screen x of the press.
	pub start_x: f64,
	/// Screen y of the press.
	pub start_y: f64,
}

/// Square a node photo is drawn into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhotoRect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Side length.
	pub size: f64,
}

/// Painted geometry of one node, derived from its clamped position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeLayout {
	/// Clamped center x.
	pub x: f64,
	/// Clamped center y.
	pub y: f64,
	/// Base radius times the size multiplier.
	pub radius: f64,
	/// Abbreviation anchor x.
	pub label_x: f64,
	/// Abbreviation anchor y.
	pub label_y: f64,
	/// Photo square inside the circle.
	pub photo: PhotoRect,
}

/// What a selection or search pass asks the host to display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewUpdate {
	/// Match readout, set by `search`.
	pub readout: Option<String>,
	/// Detail panel contents when the selection changed.
	pub selected: Option<DetailPanel>,
}

/// Graph view state for one rendered directory snapshot.
pub struct OrgGraphState {
	/// View configuration.
	pub config: GraphConfig,
	/// Nodes and edges.
	pub model: HierarchyModel,
	/// Paint state per node.
	pub views: Vec<NodeView>,
	/// Geometry per node, from the latest position batch.
	pub layouts: Vec<NodeLayout>,
	/// Legend rows; empty when the legend is hidden or nothing is grouped.
	pub legend: Vec<LegendEntry>,
	/// Photo URL per node.
	pub photo_urls: Vec<Option<String>>,
	/// Current grouping.
	pub group_mode: GroupMode,
	/// Current search text.
	pub query: String,
	/// Selected node.
	pub selected: Option<usize>,
	/// Logical to screen mapping.
	pub transform: ViewTransform,
	/// Pointer press in progress.
	pub drag: DragState,
	/// Node under the pointer.
	pub hovered: Option<usize>,
	/// Element width in screen pixels.
	pub width: f64,
	/// Element height in screen pixels.
	pub height: f64,
	engine: ForceLayout,
	images: Arc<dyn ImageRetriever>,
	grouping: Grouping,
	search_outcome: SearchOutcome,
}

impl OrgGraphState {
	/// Builds the model, layout and view state for `employees`.
	pub fn new(employees: &[Employee], config: GraphConfig, images: Arc<dyn ImageRetriever>) -> Self {
		let model = HierarchyModel::build(employees);
		let engine = ForceLayout::new(
			model.nodes.len(),
			&model.edges,
			config.width,
			config.height,
			config.forces,
		);
		let photo_urls = model
			.nodes
			.iter()
			.map(|n| {
				n.employee
					.email
					.as_deref()
					.and_then(|email| images.image_url(email))
					.filter(|url| !url.is_empty())
			})
			.collect();
		info!(
			"org chart: rendering {} employees, {} reporting lines, {} unresolved managers",
			model.nodes.len(),
			model.edges.len(),
			model.dangling.len()
		);

		let mut state = Self {
			views: vec![NodeView::default(); model.nodes.len()],
			layouts: vec![NodeLayout::default(); model.nodes.len()],
			legend: Vec::new(),
			photo_urls,
			group_mode: GroupMode::None,
			query: String::new(),
			selected: None,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			hovered: None,
			width: config.width,
			height: config.height,
			grouping: Grouping::default(),
			search_outcome: SearchOutcome::default(),
			engine,
			images,
			model,
			config,
		};
		state.grouping = Grouping::compute(&state.model.nodes, GroupMode::None);
		state.search_outcome = search(&state.model.nodes, "", state.config.include_mobile);
		state.legend = state.visible_legend();
		state.reconcile();
		let positions = state.engine.positions();
		state.on_positions(&positions);
		state
	}

	/// Recolors every node by `mode` and replaces the legend.
	pub fn regroup(&mut self, mode: GroupMode) {
		self.group_mode = mode;
		self.grouping = Grouping::compute(&self.model.nodes, mode);
		self.legend = self.visible_legend();
		debug!("org chart: grouped by {:?} into {} groups", mode, self.grouping.legend.len());
		self.reconcile();
	}

	/// Re-evaluates the search from scratch. A single remaining match
	/// becomes the selection.
	pub fn search(&mut self, query: &str) -> ViewUpdate {
		self.query = query.to_string();
		self.search_outcome = search(&self.model.nodes, query, self.config.include_mobile);
		let mut update = ViewUpdate {
			readout: Some(self.search_outcome.readout.clone()),
			selected: None,
		};
		match self.search_outcome.unique_match {
			Some(idx) => update.selected = self.select(idx),
			None => self.reconcile(),
		}
		update
	}

	/// Makes `idx` the only selected node and returns its detail panel.
	pub fn select(&mut self, idx: usize) -> Option<DetailPanel> {
		let node = self.model.nodes.get(idx)?;
		let panel =
			DetailPanel::for_employee(&node.employee, self.images.as_ref(), self.config.include_mobile);
		self.selected = Some(idx);
		self.reconcile();
		Some(panel)
	}

	/// Rebuilds every node's paint state from grouping, search and selection.
	fn reconcile(&mut self) {
		let selected = selection_flags(self.model.nodes.len(), self.selected);
		for (i, view) in self.views.iter_mut().enumerate() {
			*view = NodeView {
				group: self.grouping.labels.get(i).cloned().unwrap_or_default(),
				color: self.grouping.colors.get(i).copied().unwrap_or_default(),
				selected: selected[i],
				non_match: self.search_outcome.non_match.get(i).copied().unwrap_or(false),
			};
		}
	}

	fn visible_legend(&self) -> Vec<LegendEntry> {
		if self.config.show_legend {
			self.grouping.legend.clone()
		} else {
			Vec::new()
		}
	}

	/// Applies a batch of engine positions: clamps each node inside the
	/// logical canvas and re-derives circle, label and photo placement.
	pub fn on_positions(&mut self, positions: &[NodePosition]) {
		let (w, h, base, border) = (
			self.config.width,
			self.config.height,
			self.config.radius,
			self.config.photo_border,
		);
		for p in positions {
			let (Some(node), Some(layout)) =
				(self.model.nodes.get(p.index), self.layouts.get_mut(p.index))
			else {
				continue;
			};
			let r = base * node.radius_multiplier;
			let x = p.x.min(w - r).max(r);
			let y = p.y.min(h - r).max(r);
			*layout = NodeLayout {
				x,
				y,
				radius: r,
				label_x: x,
				label_y: y + LABEL_OFFSET,
				photo: PhotoRect {
					x: x - r + border,
					y: y - r + border,
					size: 2.0 * r - 2.0 * border,
				},
			};
		}
	}

	/// One animation frame of simulation.
	pub fn tick(&mut self, dt: f32) {
		let positions = self.engine.step(dt);
		self.on_positions(&positions);
	}

	/// Fits the logical canvas into an element of the given pixel size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let k = (width / self.config.width).min(height / self.config.height);
		self.transform = ViewTransform {
			x: 0.0,
			y: 0.0,
			k: if k.is_finite() && k > 0.0 { k } else { 1.0 },
		};
	}

	/// Screen position to logical canvas position.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen position.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.layouts.iter().rposition(|l| {
			let (dx, dy) = (l.x - gx, l.y - gy);
			(dx * dx + dy * dy).sqrt() < l.radius
		})
	}

	/// Records a press on node `idx` at a screen position.
	pub fn begin_drag(&mut self, idx: usize, sx: f64, sy: f64) {
		self.drag = DragState {
			active: true,
			moved: false,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
		};
	}

	/// Moves the pressed node once the pointer leaves the click slop.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		if (sx - self.drag.start_x).hypot(sy - self.drag.start_y) > CLICK_SLOP {
			self.drag.moved = true;
		}
		if self.drag.moved {
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.engine.pin(idx, gx, gy);
		}
	}

	/// Ends a drag; returns the node when the press never moved (a click).
	pub fn end_drag(&mut self) -> Option<usize> {
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node_idx.filter(|_| drag.active)?;
		if drag.moved {
			self.engine.release(idx);
			None
		} else {
			Some(idx)
		}
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		let changed = self.hovered != node;
		self.hovered = node;
		changed
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::org_chart::grouping::CATEGORY10;
	use crate::images::{NoImages, TemplateImageRetriever};

	fn employees() -> Vec<Employee> {
		vec![
			Employee {
				department: Some("Exec".into()),
				email: Some("alice@corp.test".into()),
				..Employee::new(1, "Alice Smith")
			},
			Employee {
				department: Some("Engineering".into()),
				..Employee::new(2, "Bob Jones").reporting_to(1)
			},
			Employee {
				department: Some("Legal".into()),
				..Employee::new(3, "Carol White").reporting_to(2)
			},
		]
	}

	fn state(config: GraphConfig) -> OrgGraphState {
		OrgGraphState::new(&employees(), config, Arc::new(NoImages))
	}

	#[test]
	fn clamps_inside_canvas_by_scaled_radius() {
		let mut s = state(GraphConfig::default());
		s.on_positions(&[
			NodePosition {
				index: 0,
				x: -50.0,
				y: 2000.0,
			},
			NodePosition {
				index: 2,
				x: 400.0,
				y: 300.0,
			},
		]);
		// Alice is a root: 15 * 1.6.
		assert_eq!((s.layouts[0].x, s.layouts[0].y), (24.0, 676.0));
		assert_eq!(s.layouts[0].label_y, 681.0);
		assert_eq!(
			s.layouts[0].photo,
			PhotoRect {
				x: 4.0,
				y: 656.0,
				size: 40.0
			}
		);
		assert_eq!((s.layouts[2].x, s.layouts[2].y, s.layouts[2].radius), (400.0, 300.0, 15.0));
	}

	#[test]
	fn latest_positions_win() {
		let mut s = state(GraphConfig::default());
		let at = |x| NodePosition { index: 1, x, y: 100.0 };
		s.on_positions(&[at(100.0)]);
		s.on_positions(&[at(200.0)]);
		assert_eq!(s.layouts[1].x, 200.0);
	}

	#[test]
	fn ticks_keep_nodes_on_canvas() {
		let mut s = state(GraphConfig::default());
		for _ in 0..50 {
			s.tick(0.016);
		}
		for l in &s.layouts {
			assert!(l.x >= l.radius && l.x <= 1000.0 - l.radius);
			assert!(l.y >= l.radius && l.y <= 700.0 - l.radius);
		}
	}

	#[test]
	fn regroup_recolors_and_replaces_legend() {
		let mut s = state(GraphConfig::default());
		assert_eq!(s.legend.len(), 1);
		s.regroup(GroupMode::Department);
		assert_eq!(s.views[1].group, "Engineering");
		assert_eq!(s.views[1].color, CATEGORY10[1]);
		let labels: Vec<_> = s.legend.iter().map(|e| e.label.as_str()).collect();
		assert_eq!(labels, vec!["Engineering", "Exec", "Legal"]);

		s.regroup(GroupMode::None);
		assert_eq!(s.legend.len(), 1);
		assert!(s.views.iter().all(|v| v.color == CATEGORY10[0]));
	}

	#[test]
	fn legend_suppressed_when_disabled() {
		let mut s = state(GraphConfig::hover_compact());
		s.regroup(GroupMode::Department);
		assert!(s.legend.is_empty());
		assert_eq!(s.views[2].color, CATEGORY10[2]);
	}

	#[test]
	fn unique_search_match_selects() {
		let mut s = state(GraphConfig::default());
		let update = s.search("legal");
		assert_eq!(update.readout.as_deref(), Some("(1 matches)"));
		assert_eq!(update.selected.map(|p| p.name), Some("Carol White".to_string()));
		assert_eq!(s.selected, Some(2));
		let flags: Vec<_> = s.views.iter().map(|v| (v.selected, v.non_match)).collect();
		assert_eq!(flags, vec![(false, true), (false, true), (true, false)]);

		let cleared = s.search("");
		assert_eq!(cleared.readout.as_deref(), Some(""));
		assert_eq!(cleared.selected, None);
		assert!(s.views.iter().all(|v| !v.non_match));
		assert_eq!(s.selected, Some(2));
	}

	#[test]
	fn selected_and_non_match_are_independent() {
		let mut s = state(GraphConfig::default());
		s.select(0);
		s.search("jones");
		assert_eq!(s.selected, Some(1));
		s.select(0);
		assert!(s.views[0].selected && s.views[0].non_match);
		assert_eq!(s.views.iter().filter(|v| v.selected).count(), 1);
	}

	#[test]
	fn select_out_of_range_is_ignored() {
		let mut s = state(GraphConfig::default());
		assert_eq!(s.select(9), None);
		assert_eq!(s.selected, None);
	}

	#[test]
	fn photo_urls_resolved_per_node() {
		let s = OrgGraphState::new(
			&employees(),
			GraphConfig::default(),
			Arc::new(TemplateImageRetriever::new("/p/{user}.jpg")),
		);
		assert_eq!(s.photo_urls, vec![Some("/p/alice.jpg".to_string()), None, None]);
	}

	#[test]
	fn resize_fits_logical_canvas() {
		let mut s = state(GraphConfig::default());
		s.resize(500.0, 700.0);
		assert_eq!(s.transform.k, 0.5);
		assert_eq!(s.screen_to_graph(100.0, 50.0), (200.0, 100.0));
	}

	#[test]
	fn press_without_motion_is_a_click() {
		let mut s = state(GraphConfig::default());
		s.on_positions(&[NodePosition {
			index: 1,
			x: 300.0,
			y: 300.0,
		}]);
		let hit = s.node_at_position(305.0, 302.0);
		assert_eq!(hit, Some(1));
		s.begin_drag(1, 305.0, 302.0);
		s.drag_to(306.0, 302.0);
		assert_eq!(s.end_drag(), Some(1));

		s.begin_drag(1, 305.0, 302.0);
		s.drag_to(400.0, 400.0);
		assert_eq!(s.end_drag(), None);
		assert!(!s.drag.active);
	}
}
