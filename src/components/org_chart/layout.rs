use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::config::ForceParameters;
use super::types::OrgEdge;

const LINK_STRENGTH: f32 = 0.1;
const GRAVITY_RATE: f32 = 0.1;

/// Raw engine position for one node, before clamping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
	/// Node index in the hierarchy model.
	pub index: usize,
	/// Logical x.
	pub x: f64,
	/// Logical y.
	pub y: f64,
}

/// Wraps the `force_graph` simulation. Every `step` emits a full set of
/// positions; callers treat the latest batch as authoritative.
pub struct ForceLayout {
	graph: ForceGraph<usize, ()>,
	handles: Vec<DefaultNodeIdx>,
	edges: Vec<OrgEdge>,
	forces: ForceParameters,
	center: (f32, f32),
}

impl ForceLayout {
	/// Seeds `node_count` nodes on a circle around the canvas center.
	pub fn new(
		node_count: usize,
		edges: &[OrgEdge],
		width: f64,
		height: f64,
		forces: ForceParameters,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: forces.charge.abs(),
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let handles: Vec<DefaultNodeIdx> = (0..node_count)
			.map(|i| {
				let angle = (i as f64) * 2.0 * PI / node_count as f64;
				graph.add_node(NodeData {
					x: (width / 2.0 + 100.0 * angle.cos()) as f32,
					y: (height / 2.0 + 100.0 * angle.sin()) as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: i,
				})
			})
			.collect();

		for edge in edges {
			graph.add_edge(handles[edge.source], handles[edge.target], EdgeData::default());
		}

		Self {
			graph,
			handles,
			edges: edges.to_vec(),
			forces,
			center: ((width / 2.0) as f32, (height / 2.0) as f32),
		}
	}

	/// Advances the simulation and returns every node's new position.
	pub fn step(&mut self, dt: f32) -> Vec<NodePosition> {
		self.graph.update(dt);
		self.constrain();
		self.positions()
	}

	/// Current positions without advancing.
	pub fn positions(&self) -> Vec<NodePosition> {
		let mut positions = Vec::with_capacity(self.handles.len());
		self.graph.visit_nodes(|node| {
			positions.push(NodePosition {
				index: node.data.user_data,
				x: node.x() as f64,
				y: node.y() as f64,
			});
		});
		positions.sort_by_key(|p| p.index);
		positions
	}

	/// Holds a node at `(x, y)` until released.
	pub fn pin(&mut self, index: usize, x: f64, y: f64) {
		let Some(&handle) = self.handles.get(index) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	/// Returns a pinned node to the simulation.
	pub fn release(&mut self, index: usize) {
		let Some(&handle) = self.handles.get(index) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.is_anchor = false;
			}
		});
	}

	/// Link rest length and center gravity, applied on top of the engine's
	/// charge and spring forces.
	fn constrain(&mut self) {
		let mut pos = vec![(0.0f32, 0.0f32, false); self.handles.len()];
		self.graph.visit_nodes(|node| {
			pos[node.data.user_data] = (node.x(), node.y(), node.data.is_anchor);
		});

		let mut shift = vec![(0.0f32, 0.0f32); pos.len()];
		for edge in &self.edges {
			let (sx, sy, _) = pos[edge.source];
			let (tx, ty, _) = pos[edge.target];
			let (dx, dy) = (tx - sx, ty - sy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < 0.001 {
				continue;
			}
			let k = (dist - self.forces.link_distance) / dist * LINK_STRENGTH * 0.5;
			shift[edge.source].0 += dx * k;
			shift[edge.source].1 += dy * k;
			shift[edge.target].0 -= dx * k;
			shift[edge.target].1 -= dy * k;
		}

		let pull = self.forces.gravity * GRAVITY_RATE;
		let (cx, cy) = self.center;
		self.graph.visit_nodes_mut(|node| {
			let i = node.data.user_data;
			if node.data.is_anchor {
				return;
			}
			let (x, y, _) = pos[i];
			node.data.x = x + shift[i].0 + (cx - x) * pull;
			node.data.y = y + shift[i].1 + (cy - y) * pull;
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn chain() -> ForceLayout {
		let edges = [OrgEdge { source: 1, target: 0 }, OrgEdge { source: 2, target: 1 }];
		ForceLayout::new(3, &edges, 1000.0, 700.0, ForceParameters::default())
	}

	#[test]
	fn seeds_around_center() {
		let positions = chain().positions();
		assert_eq!(positions.len(), 3);
		assert_eq!(positions[0].index, 0);
		assert!((positions[0].x - 600.0).abs() < 1e-3);
		assert!((positions[0].y - 350.0).abs() < 1e-3);
	}

	#[test]
	fn step_emits_every_node() {
		let mut layout = chain();
		let positions = layout.step(0.016);
		let indices: Vec<_> = positions.iter().map(|p| p.index).collect();
		assert_eq!(indices, vec![0, 1, 2]);
		assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
	}

	#[test]
	fn pinned_node_stays_put() {
		let mut layout = chain();
		layout.pin(1, 42.0, 24.0);
		let positions = layout.step(0.016);
		assert_eq!((positions[1].x, positions[1].y), (42.0, 24.0));

		layout.release(1);
		layout.step(0.016);
		assert_ne!(layout.positions()[1].x, 42.0);
	}

	#[test]
	fn empty_layout() {
		let mut layout = ForceLayout::new(0, &[], 1000.0, 700.0, ForceParameters::default());
		assert!(layout.step(0.016).is_empty());
	}
}
