//! Reload sessions of the graph store over in-memory storage.

use service_mesh_graph::graph::{
	GraphState, GraphStore, MemoryStorage, PersistenceAdapter, PlacementEngine, STORAGE_KEY,
	Viewport, ViewportHandle,
};

fn open_with(storage: MemoryStorage) -> (GraphStore<MemoryStorage>, ViewportHandle) {
	let viewport = ViewportHandle::new();
	let store = GraphStore::open(
		PersistenceAdapter::new(storage, STORAGE_KEY),
		PlacementEngine::new(viewport.clone()),
	);
	(store, viewport)
}

/// Reopens whatever the first session wrote.
fn reopen(store: &GraphStore<MemoryStorage>) -> GraphStore<MemoryStorage> {
	let raw = store
		.persistence()
		.storage()
		.raw(STORAGE_KEY)
		.expect("graph was written");
	open_with(MemoryStorage::with_entry(STORAGE_KEY, &raw)).0
}

#[test]
fn edits_survive_a_reload() {
	let (mut store, viewport) = open_with(MemoryStorage::new());
	viewport.set(Viewport {
		offset_x: 0.0,
		offset_y: 0.0,
		zoom: 1.0,
		width: 600.0,
		height: 400.0,
	});

	let cart = store.add_node("Cart").unwrap();
	assert!(store.add_edge("2", &cart));
	assert!(store.edit_edge(&format!("e2-{cart}"), "5 RPS"));
	assert!(store.edit_node("1", "Gateway"));
	assert!(store.remove_edge("e1-2"));
	assert_eq!(store.persistence().storage().writes(), 5);

	let reloaded = reopen(&store);
	assert_eq!(reloaded.state(), store.state());
	assert_eq!(reloaded.node(&cart).unwrap().position.x, 300.0);
	assert_eq!(reloaded.edge(&format!("e2-{cart}")).unwrap().label, "5 RPS");
}

#[test]
fn seeded_session_remove_first_service() {
	let (mut store, _) = open_with(MemoryStorage::new());
	store.remove_node("1");

	let state = reopen(&store).state().clone();
	assert_eq!(state.nodes.len(), 1);
	assert_eq!(state.nodes[0].id, "2");
	assert_eq!(state.nodes[0].data.label, "Service 2");
	assert!(state.edges.is_empty());
}

#[test]
fn empty_stored_graph_is_not_reseeded() {
	let (store, _) = open_with(MemoryStorage::with_entry(
		STORAGE_KEY,
		r#"{"nodes": [], "edges": []}"#,
	));
	assert_eq!(store.state(), &GraphState::default());
}

#[test]
fn filtered_view_tracks_mutations() {
	let (mut store, _) = open_with(MemoryStorage::with_entry(STORAGE_KEY, "not json"));
	assert_eq!(store.state(), &GraphState::seed());

	let checkout = store.add_node("Checkout").unwrap();
	store.add_node("Billing").unwrap();
	store.add_edge(&checkout, "1");

	let view = store.view("CHECK");
	assert_eq!(view.nodes.len(), 1);
	assert_eq!(view.nodes[0].id, checkout);
	assert_eq!(view.edges.len(), 1);
	assert_eq!(view.edges[0].target, "1");

	store.remove_node(&checkout);
	let view = store.view("check");
	assert!(view.nodes.is_empty());
	assert!(view.edges.is_empty());
	assert_eq!(store.view("").nodes.len(), 3);
}
