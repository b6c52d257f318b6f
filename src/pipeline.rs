//! Input text to [`Scene`]: parse, build, score, lay out, describe.

use log::info;

use crate::error::GraphError;
use crate::graph::{EntanglementGraph, Topology, build_graph};
use crate::input::{parse_alpha, parse_central, parse_node_list};
use crate::layout::LayoutEngine;
use crate::metrics::EntanglementReport;
use crate::scene::{Scene, ViewConfig};

/// The two end-to-end flavours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
	/// Hub plus complete subgraph, plain labels, no metrics.
	#[default]
	Complete,
	/// Star graph scored by entanglement strength, with entropy caption.
	Entanglement,
}

impl Variant {
	/// Graph shape this variant builds.
	pub fn topology(self) -> Topology {
		match self {
			Self::Complete => Topology::HubAndComplete,
			Self::Entanglement => Topology::HubOnly,
		}
	}

	/// Whether alpha is read and strengths are computed.
	pub fn uses_metrics(self) -> bool {
		self == Self::Entanglement
	}
}

/// Raw form values for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineRequest {
	/// Node list literal, e.g. `[1, 2, 3]`.
	pub nodes: String,
	/// Central node id.
	pub central: String,
	/// Read only by [`Variant::Entanglement`].
	pub alpha: String,
	/// Which flavour to run.
	pub variant: Variant,
}

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineRun {
	/// The built graph.
	pub graph: EntanglementGraph,
	/// Strengths and entropy, for [`Variant::Entanglement`].
	pub report: Option<EntanglementReport>,
	/// What to draw.
	pub scene: Scene,
}

/// Execute every stage, stopping at the first error.
pub fn run(
	request: &PipelineRequest,
	engine: &impl LayoutEngine,
	view: &ViewConfig,
) -> Result<PipelineRun, GraphError> {
	let nodes = parse_node_list(&request.nodes)?;
	let central = parse_central(&request.central)?;
	let alpha = if request.variant.uses_metrics() {
		Some(parse_alpha(&request.alpha)?)
	} else {
		None
	};

	let graph = build_graph(&nodes, central, request.variant.topology())?;
	let report = alpha
		.map(|alpha| EntanglementReport::compute(&graph, alpha))
		.transpose()?;

	let positions = engine.layout(&graph);
	let scene = Scene::build(&graph, &positions, report.as_ref(), view)?;

	info!(
		"{:?} run: {} nodes, {} edges, {} lines drawn",
		request.variant,
		graph.node_count(),
		graph.edge_count(),
		scene.lines.len()
	);
	Ok(PipelineRun {
		graph,
		report,
		scene,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::SpringLayout;
	use crate::scene::{LineStyle, PairFilter};

	fn request(nodes: &str, central: &str, alpha: &str, variant: Variant) -> PipelineRequest {
		PipelineRequest {
			nodes: nodes.into(),
			central: central.into(),
			alpha: alpha.into(),
			variant,
		}
	}

	fn execute(req: &PipelineRequest) -> Result<PipelineRun, GraphError> {
		run(req, &SpringLayout::default(), &ViewConfig::default())
	}

	#[test]
	fn three_nodes_in_both_variants() {
		let complete = execute(&request("[1, 2, 3]", "2", "", Variant::Complete)).unwrap();
		assert_eq!(complete.graph.edges(), &[(1, 2), (2, 3), (1, 3)]);
		assert!(complete.report.is_none());
		assert!(complete.scene.caption.is_none());
		let dashed: Vec<_> = complete
			.scene
			.lines
			.iter()
			.filter(|l| l.style == LineStyle::Dashed)
			.map(|l| (l.from_id, l.to_id))
			.collect();
		assert_eq!(dashed, vec![(1, 3)]);

		let star = execute(&request("[1, 2, 3]", "2", "1.0", Variant::Entanglement)).unwrap();
		assert_eq!(star.graph.edges(), &[(1, 2), (2, 3)]);
	}

	#[test]
	fn entropy_for_three_nodes() {
		let run = execute(&request("[1,2,3]", "2", "1.0", Variant::Entanglement)).unwrap();
		let report = run.report.unwrap();
		assert_eq!(report.strengths, vec![(1, 0.5), (3, 0.5)]);
		assert!((report.average - 0.5).abs() < 1e-12);
		assert_eq!(report.qubits, 5);
		assert!((report.entropy - 2.5).abs() < 1e-12);
		assert_eq!(
			run.scene.caption.as_deref(),
			Some("Total Entanglement Entropy: 2.50 bits")
		);
		assert_eq!(run.scene.points[0].label, "|1> (50.00%)");
	}

	#[test]
	fn empty_list_stops_before_layout() {
		for variant in [Variant::Complete, Variant::Entanglement] {
			assert_eq!(
				execute(&request("[]", "5", "1.0", variant)),
				Err(GraphError::DegenerateGraph { nodes: 0 })
			);
		}
	}

	#[test]
	fn negative_alpha_is_rejected() {
		let err = execute(&request("[1, 2, 3]", "2", "-1", Variant::Entanglement)).unwrap_err();
		assert!(matches!(err, GraphError::InvalidParameter { name: "alpha", .. }));
	}

	#[test]
	fn alpha_is_ignored_by_the_complete_variant() {
		assert!(execute(&request("[1, 2, 3]", "2", "not a number", Variant::Complete)).is_ok());
		assert!(matches!(
			execute(&request("[1, 2, 3]", "2", "not a number", Variant::Entanglement)),
			Err(GraphError::InputParse { field: "alpha", .. })
		));
	}

	#[test]
	fn malformed_inputs_surface_as_parse_errors() {
		assert!(matches!(
			execute(&request("1 2 3", "2", "1", Variant::Complete)),
			Err(GraphError::InputParse { field: "node list", .. })
		));
		assert!(matches!(
			execute(&request("[1, 2]", "two", "1", Variant::Complete)),
			Err(GraphError::InputParse { field: "central node", .. })
		));
	}

	#[test]
	fn pair_filter_comes_from_the_view_config() {
		let req = request("[1, 2, 3, -5]", "2", "1", Variant::Entanglement);
		let view = ViewConfig {
			pair_filter: PairFilter::DistanceWithinId,
			..ViewConfig::default()
		};
		let filtered = run(&req, &SpringLayout::default(), &view).unwrap();
		let dashed: Vec<_> = filtered
			.scene
			.lines
			.iter()
			.filter(|l| l.style == LineStyle::Dashed)
			.map(|l| (l.from_id, l.to_id))
			.collect();
		assert_eq!(dashed, vec![(1, 3)]);

		let plain = execute(&req).unwrap();
		assert!(plain.scene.lines.iter().all(|l| l.style == LineStyle::Solid));
	}

	#[test]
	fn hub_is_drawn_at_the_centroid() {
		let run = execute(&request("[4, 8, 15, 16, 23, 42]", "15", "0.2", Variant::Entanglement))
			.unwrap();
		let n = run.scene.points.len() as f64;
		for d in 0..3 {
			let mean: f64 = run.scene.points.iter().map(|p| p.position[d]).sum::<f64>() / n;
			assert!((run.scene.hub.position[d] - mean).abs() < 1e-12);
		}
		assert_eq!(run.scene.points.len(), 5);
	}
}
