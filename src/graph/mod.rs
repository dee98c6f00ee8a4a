//! Graph state and editing engine, independent of any rendering.

mod filter;
mod persistence;
mod placement;
mod store;
mod types;

pub use filter::{GraphView, filter_graph};
pub use persistence::{
	BrowserStorage, KeyValueStore, MemoryStorage, PersistenceAdapter, PersistenceError, STORAGE_KEY,
};
pub use placement::{PlacementBounds, PlacementEngine, Viewport, ViewportHandle};
pub use store::GraphStore;
pub use types::{
	DEFAULT_EDGE_LABEL, Edge, EdgeId, GraphState, Node, NodeData, NodeId, Position, UNKNOWN_METRIC,
	edge_id,
};
