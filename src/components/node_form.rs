use leptos::prelude::*;

use super::SharedStore;

/// Add, rename and remove services.
#[component]
pub fn NodeForm(store: SharedStore) -> impl IntoView {
	let (new_label, set_new_label) = signal(String::new());
	let (edit_id, set_edit_id) = signal(String::new());
	let (edit_label, set_edit_label) = signal(String::new());
	let (remove_id, set_remove_id) = signal(String::new());

	let options = move || {
		store.with(|s| {
			s.state()
				.nodes
				.iter()
				.map(|n| view! { <option value=n.id.clone()>{n.data.label.clone()}</option> })
				.collect_view()
		})
	};

	let on_add = move |_| {
		let label = new_label.get_untracked();
		let mut added = false;
		store.maybe_update(|s| {
			added = s.add_node(&label).is_some();
			added
		});
		if added {
			set_new_label.set(String::new());
		}
	};

	let on_select_edit = move |ev: web_sys::Event| {
		let id = event_target_value(&ev);
		let label = store.with_untracked(|s| s.node(&id).map(|n| n.data.label.clone()));
		set_edit_label.set(label.unwrap_or_default());
		set_edit_id.set(id);
	};

	let on_edit = move |_| {
		let (id, label) = (edit_id.get_untracked(), edit_label.get_untracked());
		let mut edited = false;
		store.maybe_update(|s| {
			edited = s.edit_node(&id, &label);
			edited
		});
		if edited {
			set_edit_id.set(String::new());
			set_edit_label.set(String::new());
		}
	};

	let on_remove = move |_| {
		let id = remove_id.get_untracked();
		store.maybe_update(|s| s.remove_node(&id));
		set_remove_id.set(String::new());
	};

	view! {
		<div class="form-stack">
			<h3>"Add New Service"</h3>
			<input
				type="text"
				placeholder="Service label"
				prop:value=move || new_label.get()
				on:input=move |ev| set_new_label.set(event_target_value(&ev))
			/>
			<button class="primary" on:click=on_add>
				"Add Node"
			</button>

			<hr />

			<h3>"Edit Service"</h3>
			<select prop:value=move || edit_id.get() on:change=on_select_edit>
				<option value="">"Select node"</option>
				{options}
			</select>
			<input
				type="text"
				placeholder="New label"
				prop:value=move || edit_label.get()
				on:input=move |ev| set_edit_label.set(event_target_value(&ev))
			/>
			<button class="warning" on:click=on_edit>
				"Update Node"
			</button>

			<hr />

			<h3>"Remove Service"</h3>
			<select prop:value=move || remove_id.get() on:change=move |ev| set_remove_id.set(event_target_value(&ev))>
				<option value="">"Select node"</option>
				{options}
			</select>
			<button class="danger" on:click=on_remove>
				"Remove Node"
			</button>
		</div>
	}
}
