//! Round-trips [`GraphState`] through a string key-value store.
//!
//! In the browser the store is `window.localStorage`. Every failure on this
//! path degrades: loads fall back to the seed graph, saves are logged and
//! dropped.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use log::warn;
use thiserror::Error;

use super::types::GraphState;

/// Key the graph is stored under.
pub const STORAGE_KEY: &str = "kiali_graph_data";

/// Why a read or write of the stored graph failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
	/// No window, or the browser refuses access to local storage.
	#[error("local storage is not available")]
	Unavailable,
	/// The backend rejected the call (quota exceeded, security error, ...).
	#[error("storage backend error: {0}")]
	Storage(String),
	/// The graph could not be serialized.
	#[error("failed to encode graph: {0}")]
	Encode(#[source] serde_json::Error),
	/// The stored value is not a graph record.
	#[error("stored graph is corrupt: {0}")]
	Decode(#[source] serde_json::Error),
}

/// Minimal string store the adapter writes through.
pub trait KeyValueStore {
	/// Value under `key`, `None` if unset.
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
	/// Replace the value under `key`.
	fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// `window.localStorage`, looked up on every access.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
	fn storage() -> Result<web_sys::Storage, PersistenceError> {
		web_sys::window()
			.ok_or(PersistenceError::Unavailable)?
			.local_storage()
			.map_err(|e| PersistenceError::Storage(format!("{e:?}")))?
			.ok_or(PersistenceError::Unavailable)
	}
}

impl KeyValueStore for BrowserStorage {
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
		Self::storage()?
			.get_item(key)
			.map_err(|e| PersistenceError::Storage(format!("{e:?}")))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
		// Quota errors surface here.
		Self::storage()?
			.set_item(key, value)
			.map_err(|e| PersistenceError::Storage(format!("{e:?}")))
	}
}

/// Process-local store, also records how many writes it received.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RefCell<HashMap<String, String>>,
	writes: Cell<usize>,
}

impl MemoryStorage {
	/// An empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// A store holding one value, as if a previous session had saved it.
	pub fn with_entry(key: &str, value: &str) -> Self {
		let storage = Self::new();
		storage.entries.borrow_mut().insert(key.into(), value.into());
		storage
	}

	/// The stored string, untouched.
	pub fn raw(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	/// Number of `set` calls so far.
	pub fn writes(&self) -> usize {
		self.writes.get()
	}
}

impl KeyValueStore for MemoryStorage {
	fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
		Ok(self.raw(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
		self.entries.borrow_mut().insert(key.into(), value.into());
		self.writes.set(self.writes.get() + 1);
		Ok(())
	}
}

/// Reads and writes the whole graph as one JSON record under a fixed key.
pub struct PersistenceAdapter<S> {
	storage: S,
	key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
	/// Adapter over `storage`, using `key` for the record.
	pub fn new(storage: S, key: impl Into<String>) -> Self {
		Self {
			storage,
			key: key.into(),
		}
	}

	/// The backing store.
	pub fn storage(&self) -> &S {
		&self.storage
	}

	/// `Ok(None)` when nothing (or a JSON `null`) is stored.
	pub fn load(&self) -> Result<Option<GraphState>, PersistenceError> {
		let Some(raw) = self.storage.get(&self.key)? else {
			return Ok(None);
		};
		serde_json::from_str::<Option<GraphState>>(&raw).map_err(PersistenceError::Decode)
	}

	/// Stored graph, or the seed graph when there is none or it cannot be read.
	///
	/// A stored graph is repaired before use, see [`GraphState::repair`].
	pub fn load_or_default(&self) -> GraphState {
		match self.load() {
			Ok(Some(mut state)) => {
				let dropped = state.repair();
				if dropped > 0 {
					warn!("Dropped {dropped} invalid nodes or edges from stored graph");
				}
				state
			}
			Ok(None) => GraphState::seed(),
			Err(err) => {
				warn!("Falling back to seed graph: {err}");
				GraphState::seed()
			}
		}
	}

	/// Serialize and write `state`, reporting failures.
	pub fn try_save(&self, state: &GraphState) -> Result<(), PersistenceError> {
		let json = serde_json::to_string(state).map_err(PersistenceError::Encode)?;
		self.storage.set(&self.key, &json)
	}

	/// Best effort: a failed write is logged and otherwise ignored.
	pub fn save(&self, state: &GraphState) {
		if let Err(err) = self.try_save(state) {
			warn!("Failed to persist graph under {:?}: {err}", self.key);
		}
	}
}
