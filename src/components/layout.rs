use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

const MENU: &[(&str, &str)] = &[
	("Graph", "/"),
	("Overview", "/overview"),
	("Istio Config", "/istio-config"),
	("Settings", "/settings"),
];

/// Permanent sidebar next to the routed page.
#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
	view! {
		<div class="layout">
			<Sidebar />
			<main class="content">{children()}</main>
		</div>
	}
}

#[component]
fn Sidebar() -> impl IntoView {
	let pathname = use_location().pathname;

	view! {
		<nav class="sidebar">
			<ul>
				{MENU
					.iter()
					.map(|&(text, path)| {
						let active = move || pathname.get() == path;
						view! {
							<li class:active=active>
								<A href=path>{text}</A>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</nav>
	}
}
