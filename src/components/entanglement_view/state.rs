use std::collections::HashSet;

use super::camera::{Projected, Projection};
use crate::layout::Vec3;
use crate::scene::{Camera, Scene};

pub const HIT_RADIUS: f64 = 10.0;
/// Degrees of rotation per dragged pixel.
pub const ROTATE_SPEED: f64 = 0.5;
/// Fraction of the shorter canvas side covered by the scene radius.
const FIT: f64 = 0.42;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub camera_start: Camera,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<i64>,
	pub neighbors: HashSet<i64>,
	pub highlight_t: f64,
	pub prev_node: Option<i64>,
	pub prev_neighbors: HashSet<i64>,
	delay_t: f64,
}

/// Mutable view over an immutable [`Scene`].
pub struct ViewState {
	pub scene: Option<Scene>,
	pub camera: Camera,
	projection: Option<Projection>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl ViewState {
	pub fn new(scene: Option<Scene>, width: f64, height: f64) -> Self {
		let mut state = Self {
			scene: None,
			camera: Camera::default(),
			projection: None,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			hover: HoverState::default(),
			width,
			height,
		};
		state.set_scene(scene);
		state
	}

	/// Swap in a new scene and reset the camera to its initial angles.
	pub fn set_scene(&mut self, scene: Option<Scene>) {
		if let Some(s) = &scene {
			self.camera = s.camera;
		}
		self.scene = scene;
		self.hover = HoverState::default();
		self.drag = DragState::default();
		self.transform.k = 1.0;
		self.reproject();
	}

	fn reproject(&mut self) {
		self.projection = self
			.scene
			.as_ref()
			.map(|s| Projection::new(&self.camera, &s.bounds));
	}

	fn unit(&self) -> f64 {
		self.width.min(self.height) * FIT * self.transform.k
	}

	/// Canvas coordinates and depth of a scene point.
	pub fn to_screen(&self, p: Vec3) -> Option<(f64, f64, f64)> {
		let Projected { x, y, depth } = self.projection.as_ref()?.project(p);
		let unit = self.unit();
		Some((self.transform.x + x * unit, self.transform.y - y * unit, depth))
	}

	/// The front-most node within [`HIT_RADIUS`] of the cursor.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<i64> {
		let scene = self.scene.as_ref()?;
		let mut found: Option<(i64, f64)> = None;
		for point in scene.points.iter().chain([&scene.hub]) {
			let Some((x, y, depth)) = self.to_screen(point.position) else {
				continue;
			};
			let (dx, dy) = (x - sx, y - sy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS
				&& found.is_none_or(|(_, best)| depth > best)
			{
				found = Some((point.id, depth));
			}
		}
		found.map(|(id, _)| id)
	}

	pub fn begin_rotate(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			start_x: x,
			start_y: y,
			camera_start: self.camera,
		};
	}

	/// Drag right to turn the scene right, drag down to tilt it toward the viewer.
	pub fn rotate_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		let start = self.drag.camera_start;
		let azimuth = start.azimuth - (x - self.drag.start_x) * ROTATE_SPEED;
		self.camera = Camera {
			elevation: (start.elevation + (y - self.drag.start_y) * ROTATE_SPEED)
				.clamp(-90.0, 90.0),
			azimuth: azimuth.rem_euclid(360.0),
		};
		self.reproject();
	}

	pub fn end_rotate(&mut self) {
		self.drag.active = false;
	}

	/// Zoom by `factor` keeping the point under the cursor fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<i64>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let (Some(id), Some(scene)) = (node, &self.scene) {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			self.hover.neighbors.extend(scene.linked(id));
		}
	}

	pub fn is_highlighted(&self, id: i64) -> bool {
		self.hover.node == Some(id)
			|| self.hover.neighbors.contains(&id)
			|| self.hover.prev_node == Some(id)
			|| self.hover.prev_neighbors.contains(&id)
	}

	pub fn is_hovered(&self, id: i64) -> bool {
		self.hover.node == Some(id) || self.hover.prev_node == Some(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// A line is lit when it touches the hovered node.
	pub fn is_line_highlighted(&self, from: i64, to: i64) -> bool {
		self.is_hovered(from) || self.is_hovered(to)
	}

	pub fn tick(&mut self, dt: f64) {
		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Topology, build_graph};
	use crate::layout::Positions;
	use crate::scene::ViewConfig;

	fn line_scene() -> Scene {
		let graph = build_graph(&[1, 2, 3], 2, Topology::HubOnly).unwrap();
		let positions: Positions = [
			(1, [1.0, 0.0, 0.0]),
			(2, [9.0, 9.0, 9.0]),
			(3, [-1.0, 0.0, 0.0]),
		]
		.into_iter()
		.collect();
		Scene::build(&graph, &positions, None, &ViewConfig::default()).unwrap()
	}

	#[test]
	fn hub_is_hit_at_the_canvas_centre() {
		let state = ViewState::new(Some(line_scene()), 800.0, 600.0);
		assert_eq!(state.node_at_position(400.0, 300.0), Some(2));
		assert_eq!(state.node_at_position(5.0, 5.0), None);

		let (x, y, _) = state.to_screen([1.0, 0.0, 0.0]).unwrap();
		assert_eq!(state.node_at_position(x + 2.0, y - 2.0), Some(1));
	}

	#[test]
	fn empty_view_hits_nothing() {
		let state = ViewState::new(None, 800.0, 600.0);
		assert_eq!(state.node_at_position(400.0, 300.0), None);
		assert!(state.to_screen([0.0; 3]).is_none());
	}

	#[test]
	fn dragging_rotates_and_clamps_elevation() {
		let mut state = ViewState::new(Some(line_scene()), 800.0, 600.0);
		assert_eq!(state.camera, Camera::default());
		state.begin_rotate(100.0, 100.0);
		state.rotate_to(120.0, 100.0);
		assert_eq!(state.camera.azimuth, 35.0);
		state.rotate_to(100.0, 1000.0);
		assert_eq!(state.camera.elevation, 90.0);
		state.end_rotate();
		state.rotate_to(0.0, 0.0);
		assert_eq!(state.camera.elevation, 90.0);

		state.set_scene(Some(line_scene()));
		assert_eq!(state.camera, Camera::default());
	}

	#[test]
	fn zoom_keeps_cursor_anchor() {
		let mut state = ViewState::new(Some(line_scene()), 800.0, 600.0);
		state.zoom_at(400.0, 300.0, 2.0);
		assert_eq!(state.transform.k, 2.0);
		assert_eq!((state.transform.x, state.transform.y), (400.0, 300.0));
		state.zoom_at(0.0, 0.0, 100.0);
		assert_eq!(state.transform.k, 10.0);
	}

	#[test]
	fn hover_highlights_neighbours_then_fades() {
		let mut state = ViewState::new(Some(line_scene()), 800.0, 600.0);
		state.set_hover(Some(1));
		assert!(state.is_highlighted(2));
		assert!(!state.is_highlighted(3));
		assert!(state.is_line_highlighted(1, 2));
		for _ in 0..100 {
			state.tick(0.016);
		}
		assert!(state.hover.highlight_t > 0.5);

		state.set_hover(None);
		assert!(state.has_active_highlight());
		for _ in 0..500 {
			state.tick(0.016);
		}
		assert!(!state.has_active_highlight());
		assert_eq!(state.hover.highlight_t, 0.0);
	}
}
