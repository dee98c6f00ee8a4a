use leptos::prelude::*;

#[component]
pub fn Overview() -> impl IntoView {
	view! {
		<section class="page">
			<h1>"Overview"</h1>
			<p>"System-wide metrics, stats, or brief summaries go here."</p>
		</section>
	}
}

#[component]
pub fn IstioConfig() -> impl IntoView {
	view! {
		<section class="page">
			<h1>"Istio Config"</h1>
			<p>"Display mock Istio config or service-related configs here."</p>
		</section>
	}
}

#[component]
pub fn Settings() -> impl IntoView {
	view! {
		<section class="page">
			<h1>"Settings (Coming Soon)"</h1>
		</section>
	}
}
