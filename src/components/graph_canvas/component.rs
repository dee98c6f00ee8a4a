use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::leptos_dom::helpers::{request_animation_frame, window_event_listener};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::frame::{Liveness, advance};
use super::render;
use super::state::{CanvasState, Gesture};
use crate::graph::{GraphView, NodeId, Position, ViewportHandle};

const ZOOM_STEP: f64 = 1.2;

type SharedState = Rc<RefCell<Option<CanvasState>>>;

fn parent_size(canvas: &HtmlCanvasElement, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	(
		parent
			.as_ref()
			.map(|p| p.client_width() as f64)
			.filter(|w| *w > 0.0)
			.unwrap_or(800.0),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(500.0)
		}),
	)
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

struct FrameLoop {
	state: SharedState,
	graph: Signal<GraphView>,
	ctx: CanvasRenderingContext2d,
	alive: Liveness,
}

/// One frame per callback; the loop ends as soon as a frame declines to draw.
fn schedule_frame(frame: FrameLoop) {
	request_animation_frame(move || {
		let keep = match frame.state.borrow_mut().as_mut() {
			Some(s) => advance(s, frame.graph, &frame.alive, |s, g| {
				render::render(s, g, &frame.ctx)
			}),
			None => false,
		};
		if keep {
			schedule_frame(frame);
		}
	});
}

/// Draws `graph` and reports its pan/zoom into `viewport`.
///
/// Dragged nodes are committed through `on_move` when the pointer is released.
/// Shift-dragging from one node to another asks for a connection through
/// `on_connect`.
#[component]
pub fn GraphCanvas(
	#[prop(into)] graph: Signal<GraphView>,
	viewport: ViewportHandle,
	#[prop(into)] on_move: Callback<(NodeId, Position)>,
	#[prop(into)] on_connect: Callback<(NodeId, NodeId)>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let alive = Liveness::new();

	let canvas_el = move || -> Option<HtmlCanvasElement> { canvas_ref.get_untracked().map(Into::into) };

	let (state_rs, viewport_rs) = (state.clone(), viewport.clone());
	let resize = window_event_listener(ev::resize, move |_| {
		let Some(canvas) = canvas_el() else { return };
		let (w, h) = parent_size(&canvas, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(ref mut s) = *state_rs.borrow_mut() {
			s.resize(w, h);
			viewport_rs.set(s.viewport());
		}
	});
	let alive_cleanup = alive.clone();
	on_cleanup(move || {
		alive_cleanup.kill();
		resize.remove();
	});

	let (state_init, viewport_init) = (state.clone(), viewport.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("Canvas 2d context unavailable");
			return;
		};

		let (w, h) = parent_size(&canvas, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut initial = CanvasState::new(w, h);
		graph.with_untracked(|g| initial.fit_to(g));
		viewport_init.set(initial.viewport());
		*state_init.borrow_mut() = Some(initial);

		schedule_frame(FrameLoop {
			state: state_init.clone(),
			graph,
			ctx,
			alive: alive.clone(),
		});
	});

	let dispatch = move |gesture: Option<Gesture>| match gesture {
		Some(Gesture::Moved(id, position)) => on_move.run((id, position)),
		Some(Gesture::Connected(source, target)) => on_connect.run((source, target)),
		None => {}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			let hit = graph.with_untracked(|g| {
				s.node_at_position(g, x, y)
					.and_then(|id| g.node(&id).cloned())
			});
			match hit {
				Some(node) if ev.shift_key() => s.begin_connect(node.id, x, y),
				Some(node) => s.begin_drag(&node, x, y),
				None => s.begin_pan(x, y),
			}
		}
	};

	let (state_mm, viewport_mm) = (state.clone(), viewport.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.node.is_some() {
				s.drag_to(x, y);
			} else if s.connect.source.is_some() {
				s.connect_to(x, y);
				s.hover = graph.with_untracked(|g| s.node_at_position(g, x, y));
			} else if s.pan.active {
				s.pan_to(x, y);
				viewport_mm.set(s.viewport());
			} else {
				s.hover = graph.with_untracked(|g| s.node_at_position(g, x, y));
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);
		let gesture = state_mu
			.borrow_mut()
			.as_mut()
			.and_then(|s| graph.with_untracked(|g| s.release(g, x, y)));
		dispatch(gesture);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let gesture = state_ml.borrow_mut().as_mut().and_then(|s| s.leave());
		dispatch(gesture);
	};

	let (state_fit, viewport_fit) = (state.clone(), viewport.clone());
	let fit = move || {
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			graph.with_untracked(|g| s.fit_to(g));
			viewport_fit.set(s.viewport());
		}
	};
	let fit_dc = fit.clone();

	let (state_zoom, viewport_zoom) = (state.clone(), viewport.clone());
	let zoom_centre = move |factor: f64| {
		if let Some(ref mut s) = *state_zoom.borrow_mut() {
			s.zoom_at(s.width / 2.0, s.height / 2.0, factor);
			viewport_zoom.set(s.viewport());
		}
	};
	let zoom_out = zoom_centre.clone();

	let (state_wh, viewport_wh) = (state.clone(), viewport.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_el() else { return };
		let (x, y) = local_point(&canvas, &ev);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
			viewport_wh.set(s.viewport());
		}
	};

	view! {
		<div class="graph-canvas-frame" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=move |_| fit_dc()
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-controls" style="position: absolute; right: 8px; bottom: 8px;">
				<button title="Zoom in" on:click=move |_| zoom_centre(ZOOM_STEP)>"+"</button>
				<button title="Zoom out" on:click=move |_| zoom_out(1.0 / ZOOM_STEP)>"−"</button>
				<button title="Fit to view" on:click=move |_| fit()>"Fit"</button>
			</div>
		</div>
	}
}
