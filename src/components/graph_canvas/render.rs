use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_RADIUS};
use crate::graph::GraphView;

const GRID_GAP: f64 = 12.0;

/// Paints one frame of `view` under the current transform.
pub fn render(state: &CanvasState, view: &GraphView, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#f0f0f0");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, view, ctx);
	draw_pending_connection(state, view, ctx);
	draw_nodes(state, view, ctx);
	ctx.restore();
}

fn draw_grid(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let gap = GRID_GAP * state.transform.k;
	if gap < 4.0 {
		return;
	}
	ctx.set_fill_style_str("#aaa");
	let mut x = state.transform.x.rem_euclid(gap);
	while x < state.width {
		let mut y = state.transform.y.rem_euclid(gap);
		while y < state.height {
			ctx.fill_rect(x, y, 1.0, 1.0);
			y += gap;
		}
		x += gap;
	}
}

fn draw_edges(state: &CanvasState, view: &GraphView, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k.max(0.5), 8.0, 4.0, 8.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	for edge in &view.edges {
		// An edge may be visible while one endpoint is filtered out.
		let (Some(n1), Some(n2)) = (view.node(&edge.source), view.node(&edge.target)) else {
			continue;
		};
		let (p1, p2) = (state.position_of(n1), state.position_of(n2));
		let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 2.0 * NODE_RADIUS {
			continue;
		}
		let highlighted = state
			.hover
			.as_deref()
			.is_some_and(|id| edge.touches(id));

		let color = if highlighted { "#1565c0" } else { "#90a4ae" };
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(if highlighted { line_width * 1.6 } else { line_width });
		if edge.animated {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(p1.x + ux * NODE_RADIUS, p1.y + uy * NODE_RADIUS);
		ctx.line_to(
			p2.x - ux * (NODE_RADIUS + arrow_size),
			p2.y - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(color);
		let (tip_x, tip_y) = (p2.x - ux * NODE_RADIUS, p2.y - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if !edge.label.is_empty() {
			let (mx, my) = ((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
			ctx.set_font("10px sans-serif");
			ctx.set_text_align("center");
			ctx.set_fill_style_str("#37474f");
			let _ = ctx.fill_text(&edge.label, mx, my - 4.0);
		}
	}
	ctx.set_text_align("start");
}

fn draw_pending_connection(state: &CanvasState, view: &GraphView, ctx: &CanvasRenderingContext2d) {
	let Some(source) = state.connect.source.as_deref().and_then(|id| view.node(id)) else {
		return;
	};
	let (from, to) = (state.position_of(source), state.connect.cursor);
	ctx.set_stroke_style_str("#1565c0");
	ctx.set_line_width(1.5 / state.transform.k.max(0.5));
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(4.0),
		&JsValue::from_f64(4.0),
	));
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &CanvasState, view: &GraphView, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	for node in &view.nodes {
		let p = state.position_of(node);
		let hovered = state.hover.as_deref() == Some(node.id.as_str());
		let dragged = state.drag.node.as_deref() == Some(node.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#ffffff");
		ctx.fill();
		ctx.set_stroke_style_str(if hovered || dragged { "#1565c0" } else { "#607d8b" });
		ctx.set_line_width(if hovered { 2.5 / k.max(0.5) } else { 1.5 / k.max(0.5) });
		ctx.stroke();

		ctx.set_text_align("center");
		ctx.set_fill_style_str("#263238");
		ctx.set_font("bold 11px sans-serif");
		let _ = ctx.fill_text(node.label(), p.x, p.y + NODE_RADIUS + 14.0);

		if hovered {
			ctx.set_font("10px sans-serif");
			ctx.set_fill_style_str("#546e7a");
			let metrics = format!("{} · {}", node.data.traffic, node.data.latency);
			let _ = ctx.fill_text(&metrics, p.x, p.y + NODE_RADIUS + 27.0);
		}
	}
	ctx.set_text_align("start");
}
