//! 3D force-directed placement (Fruchterman-Reingold spring embedder).

use std::collections::HashMap;

use log::debug;

use crate::graph::EntanglementGraph;

/// A point in layout space.
pub type Vec3 = [f64; 3];

/// Tunables for [`SpringLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Upper bound on simulation steps.
	pub iterations: usize,
	/// Mean displacement per node below which the simulation stops early.
	pub threshold: f64,
	/// Largest absolute coordinate after rescaling.
	pub scale: f64,
	/// Seed for the initial positions.
	pub seed: usize,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			iterations: 50,
			threshold: 1e-4,
			scale: 1.0,
			seed: 0,
		}
	}
}

/// One position per graph node, in graph order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Positions(Vec<(i64, Vec3)>);

impl Positions {
	/// Position of `node`, if it was placed.
	pub fn get(&self, node: i64) -> Option<Vec3> {
		self.0.iter().find(|(n, _)| *n == node).map(|&(_, p)| p)
	}

	/// `(node, position)` pairs in graph order.
	pub fn iter(&self) -> impl Iterator<Item = (i64, Vec3)> + '_ {
		self.0.iter().copied()
	}

	/// Number of placed nodes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether nothing was placed.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(i64, Vec3)> for Positions {
	fn from_iter<I: IntoIterator<Item = (i64, Vec3)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

/// Places graph nodes in 3D space.
pub trait LayoutEngine {
	/// One position for every node of `graph`.
	fn layout(&self, graph: &EntanglementGraph) -> Positions;
}

/// Spring embedder with linear cooling, rescaled into `[-scale, scale]^3`.
#[derive(Clone, Debug, Default)]
pub struct SpringLayout {
	/// Simulation tunables.
	pub params: LayoutParams,
}

impl SpringLayout {
	/// Layout with the given tunables.
	pub fn new(params: LayoutParams) -> Self {
		Self { params }
	}
}

/// Linear congruential generator (deterministic for consistency).
struct Lcg(usize);

impl Lcg {
	const M: usize = 233280;

	fn new(seed: usize) -> Self {
		Self(seed % Self::M)
	}

	fn next_unit(&mut self) -> f64 {
		self.0 = (self.0 * 9301 + 49297) % Self::M;
		(self.0 as f64) / Self::M as f64
	}
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
	[a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(v: Vec3) -> f64 {
	(v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

impl LayoutEngine for SpringLayout {
	fn layout(&self, graph: &EntanglementGraph) -> Positions {
		let nodes = graph.nodes();
		let n = nodes.len();
		if n == 0 {
			return Positions::default();
		}
		if n == 1 {
			return Positions(vec![(nodes[0], [0.0; 3])]);
		}

		let p = &self.params;
		let mut rng = Lcg::new(p.seed);
		let mut pos: Vec<Vec3> = (0..n)
			.map(|_| [rng.next_unit(), rng.next_unit(), rng.next_unit()])
			.collect();

		let index: HashMap<i64, usize> = nodes.iter().enumerate().map(|(i, &id)| (id, i)).collect();
		let mut adjacent = vec![vec![false; n]; n];
		for (a, b) in graph.edges() {
			if let (Some(&i), Some(&j)) = (index.get(&a), index.get(&b)) {
				adjacent[i][j] = true;
				adjacent[j][i] = true;
			}
		}

		let k = (1.0 / n as f64).sqrt();
		let extent = (0..3)
			.map(|d| {
				let (lo, hi) = pos.iter().fold((f64::MAX, f64::MIN), |(lo, hi), v| {
					(lo.min(v[d]), hi.max(v[d]))
				});
				hi - lo
			})
			.fold(0.0, f64::max);
		let mut temperature = extent.max(0.01) * 0.1;
		let cooling = temperature / (p.iterations as f64 + 1.0);

		let mut iterations_run = 0;
		for _ in 0..p.iterations {
			iterations_run += 1;
			let mut moved = 0.0;
			let displacement: Vec<Vec3> = (0..n)
				.map(|i| {
					let mut disp = [0.0; 3];
					for j in 0..n {
						if i == j {
							continue;
						}
						let delta = sub(pos[i], pos[j]);
						let dist = norm(delta).max(0.01);
						let attract = if adjacent[i][j] { dist / k } else { 0.0 };
						let force = k * k / (dist * dist) - attract;
						for d in 0..3 {
							disp[d] += delta[d] * force;
						}
					}
					disp
				})
				.collect();

			for (v, disp) in pos.iter_mut().zip(&displacement) {
				let length = norm(*disp);
				let length = if length < 0.01 { 0.1 } else { length };
				let step = [
					disp[0] * temperature / length,
					disp[1] * temperature / length,
					disp[2] * temperature / length,
				];
				for d in 0..3 {
					v[d] += step[d];
				}
				moved += norm(step);
			}

			temperature -= cooling;
			if moved / (n as f64) < p.threshold {
				break;
			}
		}

		rescale(&mut pos, p.scale);
		debug!("spring layout placed {n} nodes in {iterations_run} iterations");
		nodes.iter().copied().zip(pos).collect()
	}
}

/// Centre on the mean and scale so the largest absolute coordinate is `scale`.
fn rescale(pos: &mut [Vec3], scale: f64) {
	let n = pos.len() as f64;
	let mut mean = [0.0; 3];
	for v in pos.iter() {
		for d in 0..3 {
			mean[d] += v[d] / n;
		}
	}
	let mut lim: f64 = 0.0;
	for v in pos.iter_mut() {
		for d in 0..3 {
			v[d] -= mean[d];
			lim = lim.max(v[d].abs());
		}
	}
	if lim > 0.0 {
		for v in pos.iter_mut() {
			for d in 0..3 {
				v[d] *= scale / lim;
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Topology, build_graph};

	#[test]
	fn layout_is_deterministic_and_bounded() {
		let graph = build_graph(&[1, 2, 3, 4, 5], 3, Topology::HubAndComplete).unwrap();
		let engine = SpringLayout::default();
		let first = engine.layout(&graph);
		let second = engine.layout(&graph);
		assert_eq!(first, second);
		assert_eq!(first.len(), 5);

		let max = first
			.iter()
			.flat_map(|(_, p)| p)
			.fold(0.0f64, |m, c| m.max(c.abs()));
		assert!((max - 1.0).abs() < 1e-9);
		for d in 0..3 {
			let mean: f64 = first.iter().map(|(_, p)| p[d]).sum::<f64>() / 5.0;
			assert!(mean.abs() < 1e-9);
		}
	}

	#[test]
	fn every_node_gets_a_distinct_position() {
		let graph = build_graph(&[10, 20, 30, 40], 10, Topology::HubOnly).unwrap();
		let positions = SpringLayout::new(LayoutParams {
			scale: 2.0,
			..LayoutParams::default()
		})
		.layout(&graph);
		let points: Vec<_> = positions.iter().collect();
		for (i, (_, a)) in points.iter().enumerate() {
			for (_, b) in &points[i + 1..] {
				assert!(norm(sub(*a, *b)) > 1e-6);
			}
		}
		assert!(positions.get(40).is_some());
		assert!(positions.get(99).is_none());
	}

	#[test]
	fn seeds_change_the_layout() {
		let graph = build_graph(&[1, 2, 3], 2, Topology::HubOnly).unwrap();
		let a = SpringLayout::default().layout(&graph);
		let b = SpringLayout::new(LayoutParams {
			seed: 3,
			..LayoutParams::default()
		})
		.layout(&graph);
		assert_ne!(a, b);
	}
}
