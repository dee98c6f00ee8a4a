use leptos::prelude::*;

use super::SharedStore;

/// Connect services, relabel and remove connections.
#[component]
pub fn EdgeForm(store: SharedStore) -> impl IntoView {
	let (source, set_source) = signal(String::new());
	let (target, set_target) = signal(String::new());
	let (edit_id, set_edit_id) = signal(String::new());
	let (edit_label, set_edit_label) = signal(String::new());
	let (remove_id, set_remove_id) = signal(String::new());

	let node_options = move || {
		store.with(|s| {
			s.state()
				.nodes
				.iter()
				.map(|n| view! { <option value=n.id.clone()>{n.data.label.clone()}</option> })
				.collect_view()
		})
	};
	let edge_options = move || {
		store.with(|s| {
			s.state()
				.edges
				.iter()
				.map(|e| {
					let text = format!("{} → {} ({})", e.source, e.target, e.label);
					view! { <option value=e.id.clone()>{text}</option> }
				})
				.collect_view()
		})
	};

	let on_add = move |_| {
		let (s_id, t_id) = (source.get_untracked(), target.get_untracked());
		let mut added = false;
		store.maybe_update(|s| {
			added = s.add_edge(&s_id, &t_id);
			added
		});
		if added {
			set_source.set(String::new());
			set_target.set(String::new());
		}
	};

	let on_select_edit = move |ev: web_sys::Event| {
		let id = event_target_value(&ev);
		let label = store.with_untracked(|s| s.edge(&id).map(|e| e.label.clone()));
		set_edit_label.set(label.unwrap_or_default());
		set_edit_id.set(id);
	};

	let on_edit = move |_| {
		let (id, label) = (edit_id.get_untracked(), edit_label.get_untracked());
		let mut edited = false;
		store.maybe_update(|s| {
			edited = s.edit_edge(&id, &label);
			edited
		});
		if edited {
			set_edit_id.set(String::new());
			set_edit_label.set(String::new());
		}
	};

	let on_remove = move |_| {
		let id = remove_id.get_untracked();
		store.maybe_update(|s| s.remove_edge(&id));
		set_remove_id.set(String::new());
	};

	view! {
		<div class="form-stack">
			<h3>"Add New Connection"</h3>
			<select prop:value=move || source.get() on:change=move |ev| set_source.set(event_target_value(&ev))>
				<option value="">"Source node"</option>
				{node_options}
			</select>
			<select prop:value=move || target.get() on:change=move |ev| set_target.set(event_target_value(&ev))>
				<option value="">"Target node"</option>
				{node_options}
			</select>
			<button class="primary" on:click=on_add>
				"Add Edge"
			</button>

			<hr />

			<h3>"Edit Connection"</h3>
			<select prop:value=move || edit_id.get() on:change=on_select_edit>
				<option value="">"Select edge"</option>
				{edge_options}
			</select>
			<input
				type="text"
				placeholder="New label"
				prop:value=move || edit_label.get()
				on:input=move |ev| set_edit_label.set(event_target_value(&ev))
			/>
			<button class="warning" on:click=on_edit>
				"Update Edge"
			</button>

			<hr />

			<h3>"Remove Connection"</h3>
			<select prop:value=move || remove_id.get() on:change=move |ev| set_remove_id.set(event_target_value(&ev))>
				<option value="">"Select edge"</option>
				{edge_options}
			</select>
			<button class="danger" on:click=on_remove>
				"Remove Edge"
			</button>
		</div>
	}
}
