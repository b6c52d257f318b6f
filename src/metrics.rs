//! Toy entanglement scores derived from numeric distance to the central node.

use log::debug;
use nalgebra::DMatrix;

use crate::error::GraphError;
use crate::graph::EntanglementGraph;

/// `|n - central|` as a real.
pub fn distance(node: i64, central: i64) -> f64 {
	(node as i128 - central as i128).unsigned_abs() as f64
}

/// `1 / (alpha * distance + 1)`, in `(0, 1]` for non-negative alpha.
pub fn entanglement_strength(distance: f64, alpha: f64) -> f64 {
	1.0 / (alpha * distance + 1.0)
}

/// Binary digits needed for `|n|`; zero takes one digit.
pub fn bit_length(n: i64) -> u32 {
	(u64::BITS - n.unsigned_abs().leading_zeros()).max(1)
}

/// Rejects negative and non-finite `alpha`.
pub fn validate_alpha(alpha: f64) -> Result<(), GraphError> {
	if alpha.is_finite() && alpha >= 0.0 {
		Ok(())
	} else {
		Err(GraphError::InvalidParameter {
			name: "alpha",
			value: alpha.to_string(),
			reason: "must be a finite number >= 0",
		})
	}
}

/// Per-node strengths plus the aggregate entropy of one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct EntanglementReport {
	/// Decay parameter the strengths were computed with.
	pub alpha: f64,
	/// `(node, strength)` for every non-central node, in graph order.
	pub strengths: Vec<(i64, f64)>,
	/// Mean of `strengths`.
	pub average: f64,
	/// Largest strength, used to normalise colours.
	pub max_strength: f64,
	/// Sum of bit lengths over every node id, central included.
	pub qubits: u32,
	/// `-qubits * average * log2(average)`.
	pub entropy: f64,
}

impl EntanglementReport {
	/// Score every non-central node of `graph`.
	pub fn compute(graph: &EntanglementGraph, alpha: f64) -> Result<Self, GraphError> {
		validate_alpha(alpha)?;
		let central = graph.central();

		let strengths = graph
			.peripheral()
			.map(|n| {
				let d = distance(n, central);
				let decay = alpha * d;
				let strength = entanglement_strength(d, alpha);
				if decay.is_finite() && strength > 0.0 {
					Ok((n, strength))
				} else {
					Err(GraphError::InvalidParameter {
						name: "alpha",
						value: alpha.to_string(),
						reason: "too large: strength underflows to zero",
					})
				}
			})
			.collect::<Result<Vec<(i64, f64)>, _>>()?;

		let average = if strengths.is_empty() {
			0.0
		} else {
			strengths.iter().map(|(_, s)| s).sum::<f64>() / strengths.len() as f64
		};
		if average <= 0.0 || !average.is_finite() {
			return Err(GraphError::DegenerateMetric { average });
		}

		let max_strength = strengths
			.iter()
			.map(|&(_, s)| s)
			.fold(f64::MIN_POSITIVE, f64::max);
		let qubits = graph.nodes().into_iter().map(bit_length).sum();
		let entropy = -(qubits as f64) * average * average.log2();
		// log2(1) is 0, keep the caption from reading "-0.00".
		let entropy = if entropy == 0.0 { 0.0 } else { entropy };

		debug!(
			"alpha={alpha} avg={average:.4} qubits={qubits} entropy={entropy:.4} over {} nodes",
			strengths.len()
		);
		Ok(Self {
			alpha,
			strengths,
			average,
			max_strength,
			qubits,
			entropy,
		})
	}

	/// Strength of a non-central node.
	pub fn strength_of(&self, node: i64) -> Option<f64> {
		self.strengths
			.iter()
			.find(|&&(n, _)| n == node)
			.map(|&(_, s)| s)
	}

	/// Strength scaled so the strongest node is 1.
	pub fn normalized_strength(&self, node: i64) -> Option<f64> {
		self.strength_of(node).map(|s| s / self.max_strength)
	}
}

/// Shannon entropy (base 2) of the eigenvalue spectrum of a symmetric matrix.
///
/// Non-positive eigenvalues are ignored. Only the symmetric part of `rho` is
/// read.
pub fn von_neumann_entropy(rho: &DMatrix<f64>) -> Result<f64, GraphError> {
	let (rows, cols) = rho.shape();
	if !rho.is_square() {
		return Err(GraphError::InvalidParameter {
			name: "rho",
			value: format!("{rows}x{cols}"),
			reason: "density matrix must be square",
		});
	}
	if rho.iter().any(|v| !v.is_finite()) {
		return Err(GraphError::InvalidParameter {
			name: "rho",
			value: format!("{rows}x{cols}"),
			reason: "density matrix entries must be finite",
		});
	}

	let symmetric = (rho + rho.transpose()) * 0.5;
	let entropy = symmetric
		.symmetric_eigenvalues()
		.iter()
		.filter(|&&l| l > 0.0)
		.map(|&l| -l * l.log2())
		.sum::<f64>();
	Ok(if entropy == 0.0 { 0.0 } else { entropy })
}
