use log::debug;

use super::filter::{GraphView, filter_graph};
use super::persistence::{BrowserStorage, KeyValueStore, PersistenceAdapter};
use super::placement::PlacementEngine;
use super::types::{Edge, GraphState, Node, NodeData, NodeId, Position, UNKNOWN_METRIC};

/// Sole owner of the canonical graph.
///
/// Mutators validate first and either apply the change and write the whole
/// state once, or leave everything untouched. They report which happened
/// through their return value; none of them fail.
pub struct GraphStore<S = BrowserStorage> {
	state: GraphState,
	placement: PlacementEngine,
	persistence: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> GraphStore<S> {
	/// Loads the persisted graph, or the seed graph if there is none.
	pub fn open(persistence: PersistenceAdapter<S>, placement: PlacementEngine) -> Self {
		let state = persistence.load_or_default();
		debug!(
			"Opened graph with {} nodes and {} edges",
			state.nodes.len(),
			state.edges.len()
		);
		Self {
			state,
			placement,
			persistence,
		}
	}

	/// The canonical, unfiltered graph.
	pub fn state(&self) -> &GraphState {
		&self.state
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.state.node(id)
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.state.edge(id)
	}

	/// The adapter every mutation writes through.
	pub fn persistence(&self) -> &PersistenceAdapter<S> {
		&self.persistence
	}

	/// Nodes matching `search_term` and the edges touching them.
	pub fn view(&self, search_term: &str) -> GraphView {
		filter_graph(&self.state.nodes, &self.state.edges, search_term)
	}

	/// Appends a service at the centre of the visible canvas.
	pub fn add_node(&mut self, label: &str) -> Option<NodeId> {
		let label = label.trim();
		if label.is_empty() {
			debug!("Ignoring node with empty label");
			return None;
		}
		let id = self.state.next_node_id();
		let position = self.placement.next_position();
		self.state.nodes.push(Node {
			id: id.clone(),
			position,
			data: NodeData {
				label: label.into(),
				traffic: UNKNOWN_METRIC.into(),
				latency: UNKNOWN_METRIC.into(),
			},
		});
		debug!("Added node {id} at ({:.1}, {:.1})", position.x, position.y);
		self.persist();
		Some(id)
	}

	/// Removes a node together with every edge touching it.
	pub fn remove_node(&mut self, id: &str) -> bool {
		let Some(idx) = self.state.nodes.iter().position(|n| n.id == id) else {
			debug!("Ignoring removal of unknown node {id}");
			return false;
		};
		self.state.nodes.remove(idx);
		let before = self.state.edges.len();
		self.state.edges.retain(|e| !e.touches(id));
		debug!(
			"Removed node {id} and {} incident edges",
			before - self.state.edges.len()
		);
		self.persist();
		true
	}

	/// Replaces the label of `id` with `new_label`, trimmed.
	pub fn edit_node(&mut self, id: &str, new_label: &str) -> bool {
		let label = new_label.trim();
		if label.is_empty() {
			debug!("Ignoring empty label for node {id}");
			return false;
		}
		let Some(node) = self.state.nodes.iter_mut().find(|n| n.id == id) else {
			debug!("Ignoring edit of unknown node {id}");
			return false;
		};
		node.data.label = label.into();
		self.persist();
		true
	}

	/// Places `id` at `position`; a non-finite or unchanged position is ignored.
	pub fn move_node(&mut self, id: &str, position: Position) -> bool {
		if !position.is_finite() {
			return false;
		}
		let Some(node) = self.state.nodes.iter_mut().find(|n| n.id == id) else {
			return false;
		};
		if node.position == position {
			return false;
		}
		node.position = position;
		self.persist();
		true
	}

	/// Connects `source` to `target`. A connection between the same ordered
	/// pair shares its id with the new one and is replaced in place.
	pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
		if source == target {
			debug!("Ignoring self-loop on {source}");
			return false;
		}
		if !self.state.contains_node(source) || !self.state.contains_node(target) {
			debug!("Ignoring edge {source} -> {target}: unknown endpoint");
			return false;
		}
		let edge = Edge::connect(source, target);
		match self.state.edges.iter_mut().find(|e| e.id == edge.id) {
			Some(existing) => {
				debug!("Replacing edge {}", edge.id);
				*existing = edge;
			}
			None => {
				debug!("Added edge {}", edge.id);
				self.state.edges.push(edge);
			}
		}
		self.persist();
		true
	}

	/// Removes the edge with this id.
	pub fn remove_edge(&mut self, id: &str) -> bool {
		let before = self.state.edges.len();
		self.state.edges.retain(|e| e.id != id);
		if self.state.edges.len() == before {
			debug!("Ignoring removal of unknown edge {id}");
			return false;
		}
		self.persist();
		true
	}

	/// Replaces the label of edge `id` with `new_label`, trimmed.
	pub fn edit_edge(&mut self, id: &str, new_label: &str) -> bool {
		let label = new_label.trim();
		if label.is_empty() {
			return false;
		}
		let Some(edge) = self.state.edges.iter_mut().find(|e| e.id == id) else {
			debug!("Ignoring edit of unknown edge {id}");
			return false;
		};
		edge.label = label.into();
		self.persist();
		true
	}

	fn persist(&self) {
		self.persistence.save(&self.state);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::persistence::{MemoryStorage, STORAGE_KEY};
	use crate::graph::placement::{Viewport, ViewportHandle};

	fn store() -> GraphStore<MemoryStorage> {
		GraphStore::open(
			PersistenceAdapter::new(MemoryStorage::new(), STORAGE_KEY),
			PlacementEngine::new(ViewportHandle::new()),
		)
	}

	fn writes(store: &GraphStore<MemoryStorage>) -> usize {
		store.persistence().storage().writes()
	}

	#[test]
	fn opens_on_seed_without_writing() {
		let store = store();
		assert_eq!(store.state(), &GraphState::seed());
		assert_eq!(writes(&store), 0);
	}

	#[test]
	fn add_node_trims_and_defaults_metrics() {
		let mut store = store();
		let id = store.add_node("  Checkout  ").unwrap();

		let node = store.node(&id).unwrap();
		assert_eq!(node.label(), "Checkout");
		assert_eq!(node.data.traffic, "N/A");
		assert_eq!(node.data.latency, "N/A");
		assert_eq!(store.state().nodes.len(), 3);
		assert_eq!(writes(&store), 1);
	}

	#[test]
	fn add_node_uses_viewport_centre() {
		let handle = ViewportHandle::new();
		let mut store = GraphStore::open(
			PersistenceAdapter::new(MemoryStorage::new(), STORAGE_KEY),
			PlacementEngine::new(handle.clone()),
		);
		handle.set(Viewport {
			offset_x: 50.0,
			offset_y: 50.0,
			zoom: 0.5,
			width: 1000.0,
			height: 500.0,
		});

		let id = store.add_node("Gateway").unwrap();
		assert_eq!(store.node(&id).unwrap().position, Position::new(900.0, 400.0));
	}

	#[test]
	fn blank_labels_are_ignored() {
		let mut store = store();
		assert_eq!(store.add_node(""), None);
		assert_eq!(store.add_node("   "), None);
		assert!(!store.edit_node("1", " \t"));
		assert!(!store.edit_edge("e1-2", ""));
		assert_eq!(store.state(), &GraphState::seed());
		assert_eq!(writes(&store), 0);
	}

	#[test]
	fn new_ids_are_unique() {
		let mut store = store();
		let a = store.add_node("a").unwrap();
		let b = store.add_node("b").unwrap();
		assert_ne!(a, b);
		store.remove_node(&b);
		let c = store.add_node("c").unwrap();
		assert!(store.state().nodes.iter().filter(|n| n.id == c).count() == 1);
	}

	#[test]
	fn remove_node_cascades_to_edges() {
		let mut store = store();
		assert!(store.remove_node("1"));

		assert_eq!(store.state().nodes.len(), 1);
		assert_eq!(store.state().nodes[0].id, "2");
		assert_eq!(store.state().nodes[0].label(), "Service 2");
		assert!(store.state().edges.is_empty());
		assert_eq!(writes(&store), 1);

		assert!(!store.remove_node("1"));
		assert_eq!(writes(&store), 1);
	}

	#[test]
	fn remove_node_keeps_unrelated_edges() {
		let mut store = store();
		let three = store.add_node("Three").unwrap();
		store.add_edge("2", &three);
		store.add_edge(&three, "1");

		assert!(store.remove_node("1"));
		let ids: Vec<_> = store.state().edges.iter().map(|e| e.id.clone()).collect();
		assert_eq!(ids, [format!("e2-{three}")]);
	}

	#[test]
	fn edit_node_only_touches_label() {
		let mut store = store();
		let before = store.node("1").unwrap().clone();
		assert!(store.edit_node("1", " Frontend "));

		let after = store.node("1").unwrap();
		assert_eq!(after.label(), "Frontend");
		assert_eq!(after.position, before.position);
		assert_eq!(after.data.traffic, before.data.traffic);
		assert!(!store.edit_node("404", "Ghost"));
	}

	#[test]
	fn add_edge_rejects_self_loops_and_unknown_nodes() {
		let mut store = store();
		assert!(!store.add_edge("1", "1"));
		assert!(!store.add_edge("1", "404"));
		assert!(!store.add_edge("404", "2"));
		assert_eq!(store.state().edges.len(), 1);
		assert_eq!(writes(&store), 0);
	}

	#[test]
	fn duplicate_pair_overwrites() {
		let mut store = store();
		assert!(store.add_edge("2", "1"));
		assert!(store.add_edge("2", "1"));
		assert_eq!(store.state().edges.iter().filter(|e| e.id == "e2-1").count(), 1);

		// The seeded edge is reset to connection defaults, keeping its slot.
		assert!(store.add_edge("1", "2"));
		let edges = &store.state().edges;
		assert_eq!(edges.len(), 2);
		assert_eq!(edges[0].id, "e1-2");
		assert_eq!(edges[0].label, "Auto");
		assert!(edges[0].animated);
	}

	#[test]
	fn edge_edit_and_removal() {
		let mut store = store();
		assert!(store.edit_edge("e1-2", " 45 RPS "));
		assert_eq!(store.edge("e1-2").unwrap().label, "45 RPS");
		assert!(!store.edit_edge("e9-9", "x"));

		assert!(store.remove_edge("e1-2"));
		assert!(!store.remove_edge("e1-2"));
		assert_eq!(store.state().nodes.len(), 2);
		assert_eq!(writes(&store), 2);
	}

	#[test]
	fn move_node_persists_new_position() {
		let mut store = store();
		assert!(store.move_node("2", Position::new(10.0, 20.0)));
		assert!(!store.move_node("2", Position::new(10.0, 20.0)));
		assert!(!store.move_node("2", Position::new(f64::INFINITY, 0.0)));
		assert!(!store.move_node("404", Position::default()));
		assert_eq!(store.node("2").unwrap().position, Position::new(10.0, 20.0));
		assert_eq!(writes(&store), 1);
	}

	#[test]
	fn view_does_not_mutate() {
		let store = store();
		let view = store.view("service 2");
		assert_eq!(view.nodes.len(), 1);
		assert_eq!(view.edges.len(), 1);
		assert_eq!(store.state(), &GraphState::seed());
		assert_eq!(writes(&store), 0);
	}
}
