use leptos::prelude::*;

#[component]
pub fn Modal(
	open: ReadSignal<bool>,
	#[prop(into)] on_close: Callback<()>,
	title: &'static str,
	children: ChildrenFn,
) -> impl IntoView {
	view! {
		<Show when=move || open.get()>
			<div class="modal-backdrop" on:click=move |_| on_close.run(())>
				<div class="modal" on:click=|ev| ev.stop_propagation()>
					<div class="modal-header">
						<h2>{title}</h2>
						<button class="icon-button" on:click=move |_| on_close.run(())>
							"×"
						</button>
					</div>
					{children()}
				</div>
			</div>
		</Show>
	}
}
