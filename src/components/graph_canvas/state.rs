use crate::graph::{GraphView, Node, NodeId, Position, Viewport};

pub const NODE_RADIUS: f64 = 18.0;
pub const HIT_RADIUS: f64 = 22.0;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
const FIT_PADDING: f64 = 60.0;
const FIT_MAX_ZOOM: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub current: Position,
}

/// A rubber-band connection being drawn from `source`.
#[derive(Clone, Debug, Default)]
pub struct ConnectState {
	pub source: Option<NodeId>,
	pub cursor: Position,
}

/// What a finished pointer interaction asks the store to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
	Moved(NodeId, Position),
	Connected(NodeId, NodeId),
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: ConnectState,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: ConnectState::default(),
			hover: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn viewport(&self) -> Viewport {
		Viewport {
			offset_x: self.transform.x,
			offset_y: self.transform.y,
			zoom: self.transform.k,
			width: self.width,
			height: self.height,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		self.viewport().screen_to_graph(sx, sy)
	}

	/// Where `node` is drawn; follows the pointer while it is being dragged.
	pub fn position_of(&self, node: &Node) -> Position {
		match &self.drag.node {
			Some(id) if *id == node.id => self.drag.current,
			_ => node.position,
		}
	}

	pub fn node_at_position(&self, view: &GraphView, sx: f64, sy: f64) -> Option<NodeId> {
		let g = self.screen_to_graph(sx, sy);
		// Last drawn wins, matching paint order.
		view.nodes
			.iter()
			.rev()
			.find(|node| {
				let p = self.position_of(node);
				let (dx, dy) = (p.x - g.x, p.y - g.y);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|node| node.id.clone())
	}

	pub fn begin_drag(&mut self, node: &Node, sx: f64, sy: f64) {
		self.drag = DragState {
			node: Some(node.id.clone()),
			start_x: sx,
			start_y: sy,
			node_start: node.position,
			current: node.position,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		if self.drag.node.is_none() {
			return;
		}
		self.drag.current = Position::new(
			self.drag.node_start.x + (sx - self.drag.start_x) / self.transform.k,
			self.drag.node_start.y + (sy - self.drag.start_y) / self.transform.k,
		);
	}

	pub fn begin_connect(&mut self, source: NodeId, sx: f64, sy: f64) {
		self.connect = ConnectState {
			source: Some(source),
			cursor: self.screen_to_graph(sx, sy),
		};
	}

	pub fn connect_to(&mut self, sx: f64, sy: f64) {
		if self.connect.source.is_some() {
			self.connect.cursor = self.screen_to_graph(sx, sy);
		}
	}

	/// Ends a drag, returning the node and its new position if it moved.
	pub fn finish_drag(&mut self) -> Option<(NodeId, Position)> {
		let drag = std::mem::take(&mut self.drag);
		let id = drag.node?;
		(drag.current != drag.node_start).then_some((id, drag.current))
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Frames every node of `view`, leaving a margin around them.
	pub fn fit_to(&mut self, view: &GraphView) {
		let Some(first) = view.nodes.first() else {
			self.transform = ViewTransform::default();
			return;
		};
		let (mut min, mut max) = (first.position, first.position);
		for p in view.nodes.iter().map(|n| n.position) {
			min = Position::new(min.x.min(p.x), min.y.min(p.y));
			max = Position::new(max.x.max(p.x), max.y.max(p.y));
		}
		let (bw, bh) = ((max.x - min.x).max(1.0), (max.y - min.y).max(1.0));
		let k = ((self.width - 2.0 * FIT_PADDING) / bw)
			.min((self.height - 2.0 * FIT_PADDING) / bh)
			.clamp(MIN_ZOOM, FIT_MAX_ZOOM);
		let (cx, cy) = ((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// Pointer released at `(sx, sy)`. A connection ends on the node under the
	/// pointer or is dropped over empty space; a self-loop is passed on and
	/// the store ignores it.
	pub fn release(&mut self, view: &GraphView, sx: f64, sy: f64) -> Option<Gesture> {
		self.pan.active = false;
		if let Some(source) = std::mem::take(&mut self.connect).source {
			return self
				.node_at_position(view, sx, sy)
				.map(|target| Gesture::Connected(source, target));
		}
		self.finish_drag().map(|(id, p)| Gesture::Moved(id, p))
	}

	/// Pointer left the canvas: a pending connection is dropped, a drag is
	/// committed where it is.
	pub fn leave(&mut self) -> Option<Gesture> {
		self.pan.active = false;
		self.hover = None;
		self.connect = ConnectState::default();
		self.finish_drag().map(|(id, p)| Gesture::Moved(id, p))
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
