use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Opaque node identifier.
pub type NodeId = String;

/// Opaque edge identifier, see [`edge_id`].
pub type EdgeId = String;

/// Placeholder used for traffic and latency of operator-created nodes.
pub const UNKNOWN_METRIC: &str = "N/A";

/// Label given to every newly connected edge.
pub const DEFAULT_EDGE_LABEL: &str = "Auto";

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards like the canvas.
	pub y: f64,
}

impl Position {
	/// Create a position.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Neither coordinate is NaN or infinite.
	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

/// Display payload of a service node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
	/// Service name shown on the canvas and matched by search.
	pub label: String,
	/// Free-form traffic figure, e.g. `80%`.
	#[serde(default = "unknown_metric")]
	pub traffic: String,
	/// Free-form latency figure, e.g. `120ms`.
	#[serde(default = "unknown_metric")]
	pub latency: String,
}

fn unknown_metric() -> String {
	UNKNOWN_METRIC.into()
}

/// A service in the topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique within a graph.
	pub id: NodeId,
	/// Graph-space centre.
	pub position: Position,
	/// Label and metrics.
	pub data: NodeData,
}

impl Node {
	/// Shorthand for `data.label`.
	pub fn label(&self) -> &str {
		&self.data.label
	}
}

/// A directed connection between two services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Always [`edge_id`] of the endpoints for edges created here.
	pub id: EdgeId,
	/// Node the connection starts at.
	pub source: NodeId,
	/// Node the connection points to.
	pub target: NodeId,
	/// Text drawn at the middle of the edge.
	#[serde(default)]
	pub label: String,
	/// Drawn with a moving dash.
	#[serde(default)]
	pub animated: bool,
}

impl Edge {
	/// A fresh connection with the default label, animated.
	pub fn connect(source: &str, target: &str) -> Self {
		Self {
			id: edge_id(source, target),
			source: source.into(),
			target: target.into(),
			label: DEFAULT_EDGE_LABEL.into(),
			animated: true,
		}
	}

	/// Whether `node` is either endpoint.
	pub fn touches(&self, node: &str) -> bool {
		self.source == node || self.target == node
	}
}

/// Edge ids are a pure function of the ordered endpoint pair, so a second
/// connection between the same pair lands on the same id.
pub fn edge_id(source: &str, target: &str) -> EdgeId {
	format!("e{source}-{target}")
}

/// The canonical node and edge collections, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
	/// Services.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// Connections.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl GraphState {
	/// The graph shown on first launch: two services and one connection.
	pub fn seed() -> Self {
		Self {
			nodes: vec![
				Node {
					id: "1".into(),
					position: Position::new(100.0, 100.0),
					data: NodeData {
						label: "Service 1".into(),
						traffic: "80%".into(),
						latency: "120ms".into(),
					},
				},
				Node {
					id: "2".into(),
					position: Position::new(400.0, 100.0),
					data: NodeData {
						label: "Service 2".into(),
						traffic: "60%".into(),
						latency: "90ms".into(),
					},
				},
			],
			edges: vec![Edge {
				id: edge_id("1", "2"),
				source: "1".into(),
				target: "2".into(),
				label: "20 RPS".into(),
				animated: true,
			}],
		}
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// Whether a node with this id exists.
	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Smallest decimal id above every numeric id in use that is not taken.
	pub fn next_node_id(&self) -> NodeId {
		let mut next = self
			.nodes
			.iter()
			.filter_map(|n| n.id.parse::<u64>().ok())
			.max()
			.map_or(1, |max| max.saturating_add(1));
		while self.contains_node(&next.to_string()) {
			next = next.wrapping_add(1);
		}
		next.to_string()
	}

	/// Restores the invariants on data that did not come from the store:
	/// drops repeated node ids (first wins), then self-loops, edges with a
	/// missing endpoint and repeated edge ids. Returns how many items went.
	pub fn repair(&mut self) -> usize {
		let before = self.nodes.len() + self.edges.len();

		let mut seen = HashSet::new();
		self.nodes.retain(|n| seen.insert(n.id.clone()));

		let mut seen_edges = HashSet::new();
		let nodes = &seen;
		self.edges.retain(|e| {
			e.source != e.target
				&& nodes.contains(&e.source)
				&& nodes.contains(&e.target)
				&& seen_edges.insert(e.id.clone())
		});

		before - self.nodes.len() - self.edges.len()
	}
}
