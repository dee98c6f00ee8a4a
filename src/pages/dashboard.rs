use leptos::prelude::*;

use crate::components::SharedStore;
use crate::components::edge_form::EdgeForm;
use crate::components::graph_canvas::GraphCanvas;
use crate::components::modal::Modal;
use crate::components::node_form::NodeForm;
use crate::graph::{
	BrowserStorage, GraphStore, NodeId, PersistenceAdapter, PlacementEngine, Position, STORAGE_KEY,
	ViewportHandle,
};

/// Service mesh editor: search, management dialogs and the canvas.
#[component]
pub fn Dashboard() -> impl IntoView {
	// The canvas writes its transform here; the store reads it when placing nodes.
	let viewport = ViewportHandle::new();
	let store: SharedStore = RwSignal::new_local(GraphStore::open(
		PersistenceAdapter::new(BrowserStorage, STORAGE_KEY),
		PlacementEngine::new(viewport.clone()),
	));

	let (search, set_search) = signal(String::new());
	let (node_modal, set_node_modal) = signal(false);
	let (edge_modal, set_edge_modal) = signal(false);

	let graph = Signal::derive(move || search.with(|term| store.with(|s| s.view(term))));
	let on_move = move |(id, position): (NodeId, Position)| {
		store.maybe_update(|s| s.move_node(&id, position));
	};
	let on_connect = move |(source, target): (NodeId, NodeId)| {
		store.maybe_update(|s| s.add_edge(&source, &target));
	};

	view! {
		<h1>"Service Mesh Graph"</h1>

		<input
			type="search"
			class="search"
			placeholder="Search service"
			prop:value=move || search.get()
			on:input=move |ev| set_search.set(event_target_value(&ev))
		/>

		<div class="toolbar">
			<button class="primary" on:click=move |_| set_node_modal.set(true)>
				"Manage Services"
			</button>
			<button class="secondary" on:click=move |_| set_edge_modal.set(true)>
				"Manage Connections"
			</button>
		</div>

		<Modal open=node_modal on_close=move |_| set_node_modal.set(false) title="Manage Services">
			<NodeForm store=store />
		</Modal>
		<Modal open=edge_modal on_close=move |_| set_edge_modal.set(false) title="Manage Connections">
			<EdgeForm store=store />
		</Modal>

		<p class="hint">"Drag to move a service, Shift-drag from one service to another to connect them."</p>
		<div class="graph-container" style="height: 60vh;">
			<GraphCanvas graph=graph viewport=viewport on_move=on_move on_connect=on_connect />
		</div>
	}
}
