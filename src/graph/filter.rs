use std::collections::HashSet;

use super::types::{Edge, Node};

/// The subset of the canonical graph matching a search term.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphView {
	/// Matching nodes, in canonical order.
	pub nodes: Vec<Node>,
	/// Edges with at least one matching endpoint.
	pub edges: Vec<Edge>,
}

impl GraphView {
	/// Look up a visible node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// Keeps nodes whose label contains `term` (case-insensitive) and every edge
/// with at least one kept endpoint. An empty term keeps everything.
pub fn filter_graph(nodes: &[Node], edges: &[Edge], term: &str) -> GraphView {
	let needle = term.to_lowercase();
	let nodes: Vec<Node> = nodes
		.iter()
		.filter(|n| needle.is_empty() || n.label().to_lowercase().contains(&needle))
		.cloned()
		.collect();

	let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges = edges
		.iter()
		.filter(|e| visible.contains(e.source.as_str()) || visible.contains(e.target.as_str()))
		.cloned()
		.collect();

	GraphView { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{GraphState, NodeData, Position};

	fn service(id: &str, label: &str) -> Node {
		Node {
			id: id.into(),
			position: Position::default(),
			data: NodeData {
				label: label.into(),
				traffic: "N/A".into(),
				latency: "N/A".into(),
			},
		}
	}

	#[test]
	fn empty_term_keeps_everything() {
		let state = GraphState::seed();
		let view = filter_graph(&state.nodes, &state.edges, "");
		assert_eq!(view.nodes, state.nodes);
		assert_eq!(view.edges, state.edges);
	}

	#[test]
	fn edge_survives_when_one_endpoint_matches() {
		let nodes = vec![service("1", "Checkout"), service("2", "Billing")];
		let edges = vec![Edge::connect("1", "2")];

		let view = filter_graph(&nodes, &edges, "check");
		assert_eq!(view.nodes, vec![service("1", "Checkout")]);
		assert_eq!(view.edges, edges);
	}

	#[test]
	fn match_is_case_insensitive_substring() {
		let nodes = vec![
			service("1", "Checkout"),
			service("2", "Billing"),
			service("3", "CHECK-IN"),
		];
		let view = filter_graph(&nodes, &[], "ChEcK");
		let ids: Vec<_> = view.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["1", "3"]);
	}

	#[test]
	fn edges_between_hidden_nodes_are_dropped() {
		let nodes = vec![
			service("1", "Checkout"),
			service("2", "Billing"),
			service("3", "Ledger"),
		];
		let edges = vec![Edge::connect("2", "3"), Edge::connect("3", "1")];

		let view = filter_graph(&nodes, &edges, "checkout");
		assert_eq!(view.edges, vec![Edge::connect("3", "1")]);
		assert!(filter_graph(&nodes, &edges, "nothing").edges.is_empty());
	}
}
