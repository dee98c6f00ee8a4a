//! Where new nodes go: the centre of whatever the canvas is currently showing.

use std::cell::Cell;
use std::rc::Rc;

use super::types::Position;

/// Pan/zoom transform of the canvas plus its pixel size.
///
/// A graph point `g` is drawn at screen point `g * zoom + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Horizontal pan, in screen pixels.
	pub offset_x: f64,
	/// Vertical pan, in screen pixels.
	pub offset_y: f64,
	/// Scale factor, graph units to pixels.
	pub zoom: f64,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
}

impl Viewport {
	/// All fields finite, zoom and size positive.
	pub fn is_valid(&self) -> bool {
		[self.offset_x, self.offset_y, self.zoom, self.width, self.height]
			.iter()
			.all(|v| v.is_finite())
			&& self.zoom > 0.0
			&& self.width > 0.0
			&& self.height > 0.0
	}

	/// Inverse of the drawing transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> Position {
		Position::new(
			(sx - self.offset_x) / self.zoom,
			(sy - self.offset_y) / self.zoom,
		)
	}

	/// Graph point under the middle of the canvas.
	pub fn center(&self) -> Position {
		self.screen_to_graph(self.width / 2.0, self.height / 2.0)
	}
}

/// Shared slot for the canvas viewport.
///
/// The owner creates one, hands a clone to the [`PlacementEngine`] and another
/// to the canvas, which writes into it once laid out and after every pan,
/// zoom or resize. Until then it reads `None`.
#[derive(Clone, Debug, Default)]
pub struct ViewportHandle(Rc<Cell<Option<Viewport>>>);

impl ViewportHandle {
	/// An empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Last reported viewport.
	pub fn get(&self) -> Option<Viewport> {
		self.0.get()
	}

	/// Report a new viewport.
	pub fn set(&self, viewport: Viewport) {
		self.0.set(Some(viewport));
	}

	/// Forget the viewport, e.g. when the canvas goes away.
	pub fn clear(&self) {
		self.0.set(None);
	}
}

/// Box used when there is no usable viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementBounds {
	/// Top-left corner.
	pub min: Position,
	/// Bottom-right corner.
	pub max: Position,
}

impl Default for PlacementBounds {
	fn default() -> Self {
		Self {
			min: Position::new(50.0, 50.0),
			max: Position::new(450.0, 350.0),
		}
	}
}

impl PlacementBounds {
	/// Inclusive on every side.
	pub fn contains(&self, p: Position) -> bool {
		(self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
	}
}

/// Picks the graph position of each new node.
pub struct PlacementEngine {
	viewport: ViewportHandle,
	bounds: PlacementBounds,
	seed: usize,
}

impl PlacementEngine {
	/// Engine reading `viewport`, falling back to the default box.
	pub fn new(viewport: ViewportHandle) -> Self {
		Self::with_bounds(viewport, PlacementBounds::default())
	}

	/// Engine with a custom fallback box.
	pub fn with_bounds(viewport: ViewportHandle, bounds: PlacementBounds) -> Self {
		Self {
			viewport,
			bounds,
			seed: 0,
		}
	}

	/// The fallback box.
	pub fn bounds(&self) -> PlacementBounds {
		self.bounds
	}

	/// Graph-space point under the centre of the canvas, or a jittered point
	/// inside the fallback bounds before the canvas has reported a transform.
	pub fn next_position(&mut self) -> Position {
		match self.viewport.get() {
			Some(vp) if vp.is_valid() => vp.center(),
			_ => self.fallback(),
		}
	}

	fn fallback(&mut self) -> Position {
		let (rx, ry) = (rand_simple(self.seed), rand_simple(self.seed + 3));
		// Stride keeps consecutive fallbacks well apart in both axes.
		self.seed = self.seed.wrapping_add(7);
		let (min, max) = (self.bounds.min, self.bounds.max);
		Position::new(
			min.x + rx * (max.x - min.x),
			min.y + ry * (max.y - min.y),
		)
	}
}

/// Linear congruential step mapped to [0, 1).
fn rand_simple(seed: usize) -> f64 {
	let x = (seed.wrapping_add(1).wrapping_mul(9301).wrapping_add(49297)) % 233280;
	(x as f64) / 233280.0
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport(offset_x: f64, offset_y: f64, zoom: f64) -> Viewport {
		Viewport {
			offset_x,
			offset_y,
			zoom,
			width: 800.0,
			height: 500.0,
		}
	}

	#[test]
	fn centres_on_the_visible_area() {
		let handle = ViewportHandle::new();
		let mut engine = PlacementEngine::new(handle.clone());

		handle.set(viewport(0.0, 0.0, 1.0));
		assert_eq!(engine.next_position(), Position::new(400.0, 250.0));

		handle.set(viewport(100.0, -50.0, 2.0));
		assert_eq!(engine.next_position(), Position::new(150.0, 150.0));
	}

	#[test]
	fn falls_back_before_the_canvas_reports() {
		let handle = ViewportHandle::new();
		let mut engine = PlacementEngine::new(handle.clone());
		let bounds = engine.bounds();

		let first = engine.next_position();
		let second = engine.next_position();
		assert!(bounds.contains(first));
		assert!(bounds.contains(second));
		assert_ne!(first, second);

		handle.set(viewport(0.0, 0.0, 1.0));
		handle.clear();
		assert!(bounds.contains(engine.next_position()));
	}

	#[test]
	fn degenerate_viewport_uses_fallback() {
		let handle = ViewportHandle::new();
		let mut engine = PlacementEngine::new(handle.clone());

		for bad in [
			viewport(0.0, 0.0, 0.0),
			viewport(f64::NAN, 0.0, 1.0),
			Viewport {
				width: 0.0,
				..viewport(0.0, 0.0, 1.0)
			},
		] {
			assert!(!bad.is_valid());
			handle.set(bad);
			let p = engine.next_position();
			assert!(p.is_finite());
			assert!(engine.bounds().contains(p));
		}
	}
}
