//! Browser entry point: installs logging and mounts the app.

use service_mesh_graph::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
