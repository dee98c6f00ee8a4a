use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::graph::GraphStore;

pub mod edge_form;
pub mod graph_canvas;
pub mod layout;
pub mod modal;
pub mod node_form;

/// The page-owned graph store, shared with forms by handle.
pub type SharedStore = RwSignal<GraphStore, LocalStorage>;
