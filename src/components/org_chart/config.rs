/// How a node becomes the selected one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectOn {
	/// Pointer press and release without dragging.
	#[default]
	Click,
	/// Pointer entering the node.
	Hover,
}

/// Tunables handed to the force engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParameters {
	/// Rest length of report → manager links.
	pub link_distance: f32,
	/// Node repulsion; negative repels.
	pub charge: f32,
	/// Pull toward the canvas center.
	pub gravity: f32,
}

impl Default for ForceParameters {
	fn default() -> Self {
		Self {
			link_distance: 30.0,
			charge: -400.0,
			gravity: 0.3,
		}
	}
}

/// Graph view configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Logical canvas width; node positions live in this space.
	pub width: f64,
	/// Logical canvas height.
	pub height: f64,
	/// Radius of a leaf node.
	pub radius: f64,
	/// Inset of a node photo from the circle edge.
	pub photo_border: f64,
	/// Force engine tunables.
	pub forces: ForceParameters,
	/// Draw the group legend.
	pub show_legend: bool,
	/// Click or hover selection.
	pub select_on: SelectOn,
	/// Search and show mobile numbers.
	pub include_mobile: bool,
	/// Show `Phone:`/`Mobile:` before the numbers in the detail panel.
	pub prefix_contact_labels: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 1000.0,
			height: 700.0,
			radius: 15.0,
			photo_border: 4.0,
			forces: ForceParameters::default(),
			show_legend: true,
			select_on: SelectOn::Click,
			include_mobile: false,
			prefix_contact_labels: false,
		}
	}
}

impl GraphConfig {
	/// Hover-to-inspect variant: no legend, mobile numbers searched and shown.
	pub fn hover_compact() -> Self {
		Self {
			show_legend: false,
			select_on: SelectOn::Hover,
			include_mobile: true,
			prefix_contact_labels: true,
			..Self::default()
		}
	}
}
