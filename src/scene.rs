//! Renderer-agnostic description of what to draw.
//!
//! A [`Scene`] is built once per run from the graph, its layout and, for the
//! metric-aware variant, its [`EntanglementReport`]. The canvas component
//! only reads it.

use log::warn;

use crate::error::GraphError;
use crate::graph::EntanglementGraph;
use crate::layout::{Positions, Vec3};
use crate::metrics::{EntanglementReport, distance};

/// Plain node marker.
pub const NODE_COLOR: &str = "#0000ff";
/// Central node marker.
pub const HUB_COLOR: &str = "#008000";
/// Node-to-hub lines.
pub const SPOKE_COLOR: &str = "#000000";
/// Dashed links between non-central nodes.
pub const LINK_COLOR: &str = "#808080";
/// Labels and caption.
pub const LABEL_COLOR: &str = "#000000";

/// Marker radius in pixels.
pub const NODE_RADIUS: f64 = 3.0;
/// Radius for the hub and strength-coloured markers.
pub const LARGE_RADIUS: f64 = 6.0;

/// Viridis sampled at ninths of the unit interval (0, 1/9, ..., 1).
const VIRIDIS: [(u8, u8, u8); 10] = [
	(68, 1, 84),
	(72, 40, 120),
	(62, 73, 137),
	(49, 104, 142),
	(38, 130, 142),
	(31, 158, 137),
	(53, 183, 121),
	(110, 206, 88),
	(181, 222, 43),
	(253, 231, 37),
];

/// CSS colour for `t` in `[0, 1]` on the viridis map. Out-of-range values clamp.
pub fn viridis(t: f64) -> String {
	let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
	let scaled = t * (VIRIDIS.len() - 1) as f64;
	let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
	let f = scaled - i as f64;
	let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
	let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
	format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Initial viewing angles, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Degrees above the xy plane.
	pub elevation: f64,
	/// Degrees around the z axis.
	pub azimuth: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			elevation: 20.0,
			azimuth: 45.0,
		}
	}
}

/// How extra dashed links are chosen between nodes that share no edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PairFilter {
	/// Structural edges only.
	#[default]
	None,
	/// Link `i` and `j` when `distance(i) <= i` and `distance(j) <= j`.
	///
	/// Compares a distance with a node id, which has no geometric meaning.
	/// Kept only to reproduce older renderings.
	DistanceWithinId,
}

/// Presentation settings applied while building a [`Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewConfig {
	/// Initial camera.
	pub camera: Camera,
	/// Added on each side of every axis range.
	pub padding: f64,
	/// Extra dashed links beyond structural edges.
	pub pair_filter: PairFilter,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			camera: Camera::default(),
			padding: 0.1,
			pair_filter: PairFilter::None,
		}
	}
}

/// A labelled marker.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePoint {
	/// Node id.
	pub id: i64,
	/// Location in layout space.
	pub position: Vec3,
	/// CSS colour.
	pub color: String,
	/// Marker radius in pixels.
	pub radius: f64,
	/// Text drawn beside the marker.
	pub label: String,
}

/// Stroke pattern of a [`SceneLine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
	/// Spokes to the hub.
	Solid,
	/// Links between non-central nodes.
	Dashed,
}

/// A straight segment between two scene points.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLine {
	/// Id at the `from` end.
	pub from_id: i64,
	/// Id at the `to` end.
	pub to_id: i64,
	/// Start position.
	pub from: Vec3,
	/// End position.
	pub to: Vec3,
	/// Stroke pattern.
	pub style: LineStyle,
	/// CSS colour.
	pub color: &'static str,
}

/// Axis-aligned box, already padded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Lower corner.
	pub min: Vec3,
	/// Upper corner.
	pub max: Vec3,
}

impl Bounds {
	fn around(points: impl Iterator<Item = Vec3>, padding: f64) -> Self {
		let (mut min, mut max) = ([f64::MAX; 3], [f64::MIN; 3]);
		for p in points {
			for d in 0..3 {
				min[d] = min[d].min(p[d]);
				max[d] = max[d].max(p[d]);
			}
		}
		for d in 0..3 {
			min[d] -= padding;
			max[d] += padding;
		}
		Self { min, max }
	}

	/// Midpoint of the box.
	pub fn center(&self) -> Vec3 {
		[
			(self.min[0] + self.max[0]) / 2.0,
			(self.min[1] + self.max[1]) / 2.0,
			(self.min[2] + self.max[2]) / 2.0,
		]
	}

	/// Half of the longest side.
	pub fn radius(&self) -> f64 {
		(0..3)
			.map(|d| (self.max[d] - self.min[d]) / 2.0)
			.fold(0.0, f64::max)
	}
}

/// Everything the renderer draws for one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Non-central nodes.
	pub points: Vec<ScenePoint>,
	/// Central node, placed at the centroid of `points`.
	pub hub: ScenePoint,
	/// Spokes first, then dashed links.
	pub lines: Vec<SceneLine>,
	/// Padded extent of every drawn point.
	pub bounds: Bounds,
	/// Initial viewing angles.
	pub camera: Camera,
	/// Overlay text, present for the metric-aware variant.
	pub caption: Option<String>,
}

impl Scene {
	/// Assemble the scene. `report` switches on strength colouring, labels
	/// and the entropy caption.
	pub fn build(
		graph: &EntanglementGraph,
		positions: &Positions,
		report: Option<&EntanglementReport>,
		config: &ViewConfig,
	) -> Result<Self, GraphError> {
		let central = graph.central();

		let mut points = Vec::new();
		for id in graph.peripheral() {
			let Some(position) = positions.get(id) else {
				continue;
			};
			let point = match report {
				Some(report) => {
					let strength = report.strength_of(id).unwrap_or(0.0);
					ScenePoint {
						id,
						position,
						color: viridis(report.normalized_strength(id).unwrap_or(0.0)),
						radius: LARGE_RADIUS,
						label: format!("|{id}> ({:.2}%)", strength * 100.0),
					}
				}
				None => ScenePoint {
					id,
					position,
					color: NODE_COLOR.to_string(),
					radius: NODE_RADIUS,
					label: format!("|{id}>"),
				},
			};
			points.push(point);
		}

		if points.is_empty() {
			return Err(GraphError::DegenerateGraph {
				nodes: graph.node_count(),
			});
		}

		let n = points.len() as f64;
		let mut centroid = [0.0; 3];
		for p in &points {
			for d in 0..3 {
				centroid[d] += p.position[d] / n;
			}
		}
		let hub = ScenePoint {
			id: central,
			position: centroid,
			color: HUB_COLOR.to_string(),
			radius: LARGE_RADIUS,
			label: format!("|{central}>"),
		};

		let at = |id: i64| -> Option<Vec3> {
			if id == central {
				Some(centroid)
			} else {
				points.iter().find(|p| p.id == id).map(|p| p.position)
			}
		};

		let mut lines: Vec<SceneLine> = points
			.iter()
			.map(|p| SceneLine {
				from_id: p.id,
				to_id: central,
				from: p.position,
				to: centroid,
				style: LineStyle::Solid,
				color: SPOKE_COLOR,
			})
			.collect();

		let dashed = |a: i64, b: i64| -> Option<SceneLine> {
			Some(SceneLine {
				from_id: a,
				to_id: b,
				from: at(a)?,
				to: at(b)?,
				style: LineStyle::Dashed,
				color: LINK_COLOR,
			})
		};

		lines.extend(
			graph
				.edges()
				.into_iter()
				.filter(|&(a, b)| a != central && b != central)
				.filter_map(|(a, b)| dashed(a, b)),
		);

		if config.pair_filter == PairFilter::DistanceWithinId {
			warn!("drawing links with the distance-within-id pair filter");
			let passes = |n: i64| distance(n, central) <= n as f64;
			let nodes = graph.nodes();
			for (i, &a) in nodes.iter().enumerate() {
				for &b in &nodes[i + 1..] {
					if passes(a) && passes(b) && !graph.contains_edge(a, b) {
						lines.extend(dashed(a, b));
					}
				}
			}
		}

		let bounds = Bounds::around(
			points.iter().map(|p| p.position).chain([centroid]),
			config.padding,
		);
		let caption = report
			.map(|r| format!("Total Entanglement Entropy: {:.2} bits", r.entropy));

		Ok(Self {
			points,
			hub,
			lines,
			bounds,
			camera: config.camera,
			caption,
		})
	}

	/// Point for `id`, the hub included.
	pub fn point(&self, id: i64) -> Option<&ScenePoint> {
		if self.hub.id == id {
			return Some(&self.hub);
		}
		self.points.iter().find(|p| p.id == id)
	}

	/// Ids joined to `id` by any line.
	pub fn linked(&self, id: i64) -> Vec<i64> {
		self.lines
			.iter()
			.filter_map(|l| {
				if l.from_id == id {
					Some(l.to_id)
				} else if l.to_id == id {
					Some(l.from_id)
				} else {
					None
				}
			})
			.collect()
	}
}
