//! Undirected simple graph around a single central node.

use log::debug;
use petgraph::graphmap::UnGraphMap;

use crate::error::GraphError;

/// Which edges the builder lays down besides the spokes to the central node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
	/// Central node plus a complete subgraph on every other node.
	#[default]
	HubAndComplete,
	/// Star: every other node connects to the central node only.
	HubOnly,
}

/// Unordered node pair, stored as `(min, max)`.
pub type Edge = (i64, i64);

/// Undirected simple graph keyed by node id, plus the hub it is built around.
///
/// Nodes and edges iterate in insertion order. Self-loops are refused.
#[derive(Clone, Debug)]
pub struct EntanglementGraph {
	central: i64,
	topology: Topology,
	graph: UnGraphMap<i64, ()>,
}

impl PartialEq for EntanglementGraph {
	fn eq(&self, other: &Self) -> bool {
		self.central == other.central
			&& self.topology == other.topology
			&& self.nodes() == other.nodes()
			&& self.edges() == other.edges()
	}
}

impl EntanglementGraph {
	/// An empty graph that will be organised around `central`.
	pub fn new(central: i64, topology: Topology) -> Self {
		Self {
			central,
			topology,
			graph: UnGraphMap::new(),
		}
	}

	/// Adds the edge and both endpoints. Returns `false` for self-loops and
	/// edges already present.
	pub fn add_edge(&mut self, a: i64, b: i64) -> bool {
		if a == b {
			return false;
		}
		self.graph.add_edge(a, b, ()).is_none()
	}

	/// The hub id.
	pub fn central(&self) -> i64 {
		self.central
	}

	/// Which builder produced this graph.
	pub fn topology(&self) -> Topology {
		self.topology
	}

	/// Node ids in order of first appearance.
	pub fn nodes(&self) -> Vec<i64> {
		self.graph.nodes().collect()
	}

	/// Every node except the central one, in graph order.
	pub fn peripheral(&self) -> impl Iterator<Item = i64> + '_ {
		self.graph.nodes().filter(|&n| n != self.central)
	}

	/// Edges as `(min, max)` pairs in insertion order.
	pub fn edges(&self) -> Vec<Edge> {
		self.graph.all_edges().map(|(a, b, _)| (a, b)).collect()
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	/// Whether `id` is in the graph.
	pub fn contains_node(&self, id: i64) -> bool {
		self.graph.contains_node(id)
	}

	/// Whether `a` and `b` are joined, in either direction.
	pub fn contains_edge(&self, a: i64, b: i64) -> bool {
		self.graph.contains_edge(a, b)
	}

	/// Neighbours of `id` in edge insertion order.
	pub fn neighbors(&self, id: i64) -> Vec<i64> {
		if !self.graph.contains_node(id) {
			return Vec::new();
		}
		self.graph.neighbors(id).collect()
	}
}

/// Build the graph for `nodes` around `central` with the given topology.
///
/// Entries equal to `central` and repeated entries are tolerated. Fails with
/// [`GraphError::DegenerateGraph`] when fewer than two nodes remain.
pub fn build_graph(
	nodes: &[i64],
	central: i64,
	topology: Topology,
) -> Result<EntanglementGraph, GraphError> {
	let mut graph = EntanglementGraph::new(central, topology);

	for &n in nodes.iter().filter(|&&n| n != central) {
		graph.add_edge(n, central);
	}

	if topology == Topology::HubAndComplete {
		for (i, &a) in nodes.iter().enumerate() {
			for &b in &nodes[i + 1..] {
				if a != central && b != central {
					graph.add_edge(a, b);
				}
			}
		}
	}

	if graph.node_count() < 2 {
		return Err(GraphError::DegenerateGraph {
			nodes: graph.node_count(),
		});
	}

	debug!(
		"built {:?} graph around {}: {} nodes, {} edges",
		topology,
		central,
		graph.node_count(),
		graph.edge_count()
	);
	Ok(graph)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hub_and_complete_connects_every_pair() {
		let graph = build_graph(&[1, 2, 3], 2, Topology::HubAndComplete).unwrap();
		assert_eq!(graph.edges(), &[(1, 2), (2, 3), (1, 3)]);
		assert_eq!(graph.nodes(), &[1, 2, 3]);

		let graph = build_graph(&[4, 9, 1, 7], 0, Topology::HubAndComplete).unwrap();
		let others = [4, 9, 1, 7];
		for (i, &a) in others.iter().enumerate() {
			assert!(graph.contains_edge(a, 0));
			for &b in &others[i + 1..] {
				assert!(graph.contains_edge(a, b));
			}
		}
		assert_eq!(graph.edge_count(), 4 + 6);
	}

	#[test]
	fn hub_only_is_a_star() {
		let graph = build_graph(&[1, 2, 3], 2, Topology::HubOnly).unwrap();
		assert_eq!(graph.edges(), &[(1, 2), (2, 3)]);
		assert!(!graph.contains_edge(1, 3));
		assert!(graph.edges().iter().all(|&(a, b)| a == 2 || b == 2));
	}

	#[test]
	fn central_missing_from_input_is_added() {
		let graph = build_graph(&[10, 20], 5, Topology::HubOnly).unwrap();
		assert!(graph.contains_node(5));
		assert_eq!(graph.nodes(), &[10, 5, 20]);
		assert_eq!(graph.peripheral().collect::<Vec<_>>(), vec![10, 20]);
	}

	#[test]
	fn readding_an_edge_is_a_no_op() {
		let mut graph = EntanglementGraph::new(0, Topology::HubOnly);
		assert!(graph.add_edge(1, 0));
		assert!(!graph.add_edge(0, 1));
		assert!(!graph.add_edge(1, 1));
		assert_eq!(graph.edge_count(), 1);

		let graph = build_graph(&[3, 3, 1, 3], 1, Topology::HubAndComplete).unwrap();
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.neighbors(1), vec![3]);
	}

	#[test]
	fn degenerate_inputs_are_rejected() {
		assert_eq!(
			build_graph(&[], 5, Topology::HubAndComplete),
			Err(GraphError::DegenerateGraph { nodes: 0 })
		);
		assert_eq!(
			build_graph(&[5, 5], 5, Topology::HubOnly),
			Err(GraphError::DegenerateGraph { nodes: 0 })
		);
	}
}
