//! Orthographic projection of scene space onto the view plane.

use crate::layout::Vec3;
use crate::scene::{Bounds, Camera};

/// A projected point. `x` grows to the right, `y` grows upward and `depth`
/// grows toward the viewer. Coordinates are in units of the scene radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	pub depth: f64,
}

#[derive(Clone, Debug)]
pub struct Projection {
	center: Vec3,
	radius: f64,
	right: Vec3,
	up: Vec3,
	eye: Vec3,
}

impl Projection {
	pub fn new(camera: &Camera, bounds: &Bounds) -> Self {
		let (se, ce) = camera.elevation.to_radians().sin_cos();
		let (sa, ca) = camera.azimuth.to_radians().sin_cos();
		let radius = bounds.radius();
		Self {
			center: bounds.center(),
			radius: if radius > 0.0 { radius } else { 1.0 },
			right: [-sa, ca, 0.0],
			up: [-se * ca, -se * sa, ce],
			eye: [ce * ca, ce * sa, se],
		}
	}

	pub fn project(&self, p: Vec3) -> Projected {
		let v = [
			(p[0] - self.center[0]) / self.radius,
			(p[1] - self.center[1]) / self.radius,
			(p[2] - self.center[2]) / self.radius,
		];
		let dot = |a: Vec3| a[0] * v[0] + a[1] * v[1] + a[2] * v[2];
		Projected {
			x: dot(self.right),
			y: dot(self.up),
			depth: dot(self.eye),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit_box() -> Bounds {
		Bounds {
			min: [-1.0; 3],
			max: [1.0; 3],
		}
	}

	fn close(a: Projected, x: f64, y: f64, depth: f64) -> bool {
		(a.x - x).abs() < 1e-12 && (a.y - y).abs() < 1e-12 && (a.depth - depth).abs() < 1e-12
	}

	#[test]
	fn front_view_maps_y_right_and_z_up() {
		let p = Projection::new(
			&Camera {
				elevation: 0.0,
				azimuth: 0.0,
			},
			&unit_box(),
		);
		assert!(close(p.project([0.0, 1.0, 0.0]), 1.0, 0.0, 0.0));
		assert!(close(p.project([0.0, 0.0, 1.0]), 0.0, 1.0, 0.0));
		assert!(close(p.project([1.0, 0.0, 0.0]), 0.0, 0.0, 1.0));
	}

	#[test]
	fn top_view_looks_down_z() {
		let p = Projection::new(
			&Camera {
				elevation: 90.0,
				azimuth: 0.0,
			},
			&unit_box(),
		);
		assert!(close(p.project([0.0, 0.0, 1.0]), 0.0, 0.0, 1.0));
		assert!(close(p.project([-1.0, 0.0, 0.0]), 0.0, 1.0, 0.0));
	}

	#[test]
	fn points_are_measured_from_the_bounds_centre() {
		let bounds = Bounds {
			min: [8.0, 8.0, 8.0],
			max: [12.0, 12.0, 12.0],
		};
		let p = Projection::new(&Camera::default(), &bounds);
		assert!(close(p.project([10.0, 10.0, 10.0]), 0.0, 0.0, 0.0));
		let edge = p.project([10.0, 10.0, 12.0]);
		assert!((edge.y - 20f64.to_radians().cos()).abs() < 1e-12);
	}
}
