//! Failure taxonomy for a single pipeline run.
//!
//! Every variant is terminal: the run stops and nothing is rendered.

use thiserror::Error;

/// Errors raised while turning user input into a renderable scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
	/// Input text did not match the expected literal form.
	#[error("invalid {field}: {reason} (got {input:?})")]
	InputParse {
		/// Which input was being read.
		field: &'static str,
		/// What was wrong with it.
		reason: String,
		/// The offending text.
		input: String,
	},

	/// Too few nodes to lay out or to take a centroid of.
	#[error("graph needs at least 2 nodes, found {nodes}")]
	DegenerateGraph {
		/// Node count of the rejected graph.
		nodes: usize,
	},

	/// A numeric parameter is outside its accepted range.
	#[error("invalid parameter {name} = {value}: {reason}")]
	InvalidParameter {
		/// Parameter name.
		name: &'static str,
		/// Rendered value.
		value: String,
		/// Accepted range.
		reason: &'static str,
	},

	/// Average strength is not positive, so its logarithm is undefined.
	#[error("average entanglement strength must be positive, got {average}")]
	DegenerateMetric {
		/// The offending average.
		average: f64,
	},
}

impl GraphError {
	pub(crate) fn parse(field: &'static str, reason: impl Into<String>, input: &str) -> Self {
		Self::InputParse {
			field,
			reason: reason.into(),
			input: input.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failing_input() {
		let err = GraphError::parse("node list", "expected '['", "1, 2");
		assert_eq!(
			err.to_string(),
			"invalid node list: expected '[' (got \"1, 2\")"
		);
		assert_eq!(
			GraphError::DegenerateGraph { nodes: 1 }.to_string(),
			"graph needs at least 2 nodes, found 1"
		);
	}
}
