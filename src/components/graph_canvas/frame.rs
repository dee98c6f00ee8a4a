use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use super::state::CanvasState;
use crate::graph::GraphView;

/// Seconds of flow animation per frame.
pub const FRAME_DT: f64 = 0.016;

/// Cleared when the canvas is unmounted; pending frames check it and stop.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
	fn default() -> Self {
		Self::new()
	}
}

impl Liveness {
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	pub fn is_alive(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}

	pub fn kill(&self) {
		self.0.store(false, Ordering::Relaxed);
	}
}

/// Advances the animation clock and draws one frame.
///
/// Returns `false`, without drawing, once the canvas is gone or the graph
/// signal has been disposed; the caller must not schedule another frame then.
pub fn advance(
	state: &mut CanvasState,
	graph: Signal<GraphView>,
	alive: &Liveness,
	draw: impl FnOnce(&CanvasState, &GraphView),
) -> bool {
	if !alive.is_alive() {
		return false;
	}
	state.tick(FRAME_DT);
	let state = &*state;
	graph.try_with_untracked(|g| draw(state, g)).is_some()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::GraphState;

	fn seed_view() -> GraphView {
		let state = GraphState::seed();
		GraphView {
			nodes: state.nodes,
			edges: state.edges,
		}
	}

	#[test]
	fn frames_stop_once_the_graph_owner_is_cleaned_up() {
		let owner = Owner::new();
		let graph = owner.with(|| Signal::derive(seed_view));
		let alive = Liveness::new();
		let mut state = CanvasState::new(800.0, 600.0);

		let mut drawn = 0;
		assert!(advance(&mut state, graph, &alive, |_, g| {
			assert_eq!(g.nodes.len(), 2);
			drawn += 1;
		}));
		assert_eq!(drawn, 1);

		owner.cleanup();
		assert!(!advance(&mut state, graph, &alive, |_, _| drawn += 1));
		assert_eq!(drawn, 1);
	}

	#[test]
	fn frames_stop_once_the_canvas_is_unmounted() {
		let owner = Owner::new();
		let graph = owner.with(|| Signal::derive(GraphView::default));
		let alive = Liveness::new();
		let mut state = CanvasState::new(800.0, 600.0);

		assert!(advance(&mut state, graph, &alive, |_, _| {}));
		let clock = state.flow_time;

		alive.clone().kill();
		assert!(!advance(&mut state, graph, &alive, |_, _| panic!("drew after unmount")));
		assert_eq!(state.flow_time, clock);
	}
}
