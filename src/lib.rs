//! Leptos client-side service mesh topology editor.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
pub mod graph;
mod pages;

// Top-Level pages
use crate::components::layout::MainLayout;
use crate::pages::dashboard::Dashboard;
use crate::pages::info::{IstioConfig, Overview, Settings};
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the dashboard, the informational pages and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Service Mesh Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<MainLayout>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Dashboard />
					<Route path=path!("/overview") view=Overview />
					<Route path=path!("/istio-config") view=IstioConfig />
					<Route path=path!("/settings") view=Settings />
				</Routes>
			</MainLayout>
		</Router>
	}
}
