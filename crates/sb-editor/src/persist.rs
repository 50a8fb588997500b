//! Persistence adapter: the scene container in one durable key-value slot.
//!
//! The slot holds `{"canvas": {elements, selectedId, past, future}}`.
//! Load rules:
//!
//! - key absent: first run, start from the demo scene
//! - key present but empty or unparsable: the user cleared everything,
//!   start empty
//! - storage unavailable: log and start from the demo scene in memory
//!
//! Writes are debounced so a burst of edits becomes one write, and the
//! write always carries the newest state.

use crate::config::EditorConfig;
use crate::demo::demo_scene;
use crate::engine::SceneEngine;
use crate::history::HistoryStore;
use sb_core::Scene;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key-value store such as `localStorage`.
pub trait KeyValueStore {
    /// `Ok(None)` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-memory store for tests and storage-less hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─── Encoding ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SlotRef<'a> {
    canvas: &'a HistoryStore,
}

/// Encode the history container in its slot wrapper.
pub fn encode_history(history: &HistoryStore) -> Result<String, PersistError> {
    Ok(serde_json::to_string(&SlotRef { canvas: history })?)
}

/// Decode a slot value. A bare container without the wrapper is accepted
/// too, but a wrapper with unreadable contents is an error.
pub fn decode_history(text: &str) -> Result<HistoryStore, PersistError> {
    let mut value: serde_json::Value = serde_json::from_str(text)?;
    let wrapped = value.as_object_mut().and_then(|slot| slot.remove("canvas"));
    Ok(serde_json::from_value(wrapped.unwrap_or(value))?)
}

// ─── Load / save ─────────────────────────────────────────────────────────

/// How the starting state was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing saved yet (or storage unreadable): demo scene.
    FirstRun,
    /// Saved state restored.
    Restored,
    /// Slot present but empty or unparsable: empty scene.
    Cleared,
}

/// Load the history container from `key`, applying the first-run rules.
pub fn load_history(
    store: &dyn KeyValueStore,
    key: &str,
    capacity: usize,
) -> (HistoryStore, LoadOutcome) {
    let fresh = |scene: Scene| HistoryStore::with_capacity(scene, capacity);

    let raw = match store.get_item(key) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("failed to read {key}: {e}");
            return (fresh(demo_scene()), LoadOutcome::FirstRun);
        }
    };
    let Some(raw) = raw else {
        log::debug!("no saved canvas under {key}, loading demo scene");
        return (fresh(demo_scene()), LoadOutcome::FirstRun);
    };
    if raw.trim().is_empty() {
        return (fresh(Scene::default()), LoadOutcome::Cleared);
    }

    match decode_history(&raw) {
        Ok(mut history) => {
            history.set_capacity(capacity);
            (history, LoadOutcome::Restored)
        }
        Err(e) => {
            log::warn!("discarding unreadable canvas under {key}: {e}");
            (fresh(Scene::default()), LoadOutcome::Cleared)
        }
    }
}

/// Build an engine from the configured slot.
pub fn load_engine(
    store: &dyn KeyValueStore,
    config: EditorConfig,
) -> (SceneEngine, LoadOutcome) {
    let (history, outcome) = load_history(store, &config.storage_key, config.history_capacity);
    (SceneEngine::with_history(history, config), outcome)
}

/// Write the history container to `key`.
pub fn save_history(
    store: &mut dyn KeyValueStore,
    key: &str,
    history: &HistoryStore,
) -> Result<(), PersistError> {
    let text = encode_history(history)?;
    store.set_item(key, &text)
}

// ─── Debouncing ──────────────────────────────────────────────────────────

/// Coalesces writes over a quiet window.
///
/// Each `schedule` replaces the pending payload and restarts the window, so
/// whatever fires is always the newest payload. Times are milliseconds
/// from any monotonic clock the host provides.
#[derive(Debug, Clone)]
pub struct SaveDebouncer<T> {
    window_ms: f64,
    pending: Option<(f64, T)>,
}

impl<T> SaveDebouncer<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn schedule(&mut self, now_ms: f64, payload: T) {
        self.pending = Some((now_ms + self.window_ms, payload));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload if its window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<T> {
        let due = matches!(&self.pending, Some((due, _)) if now_ms >= *due);
        if !due {
            return None;
        }
        self.pending.take().map(|(_, p)| p)
    }

    /// Take the payload regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, p)| p)
    }
}

/// Watches an engine's revision and writes debounced snapshots to a store.
#[derive(Debug, Clone)]
pub struct Autosave {
    key: String,
    debouncer: SaveDebouncer<String>,
    last_revision: u64,
}

impl Autosave {
    pub fn new(key: impl Into<String>, window_ms: f64, engine: &SceneEngine) -> Self {
        Self {
            key: key.into(),
            debouncer: SaveDebouncer::new(window_ms),
            last_revision: engine.revision(),
        }
    }

    pub fn from_config(engine: &SceneEngine) -> Self {
        let config = engine.config();
        Self::new(config.storage_key.clone(), config.save_debounce_ms, engine)
    }

    /// Schedule a save if the engine changed, and write any save that is due.
    /// Returns whether a write happened.
    pub fn tick(
        &mut self,
        engine: &SceneEngine,
        store: &mut dyn KeyValueStore,
        now_ms: f64,
    ) -> bool {
        if engine.revision() != self.last_revision {
            self.last_revision = engine.revision();
            match encode_history(engine.history()) {
                Ok(text) => self.debouncer.schedule(now_ms, text),
                Err(e) => log::warn!("failed to encode canvas: {e}"),
            }
        }
        match self.debouncer.poll(now_ms) {
            Some(text) => self.write(store, &text),
            None => false,
        }
    }

    /// Write any pending save now (e.g. on page hide).
    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> bool {
        match self.debouncer.flush() {
            Some(text) => self.write(store, &text),
            None => false,
        }
    }

    fn write(&self, store: &mut dyn KeyValueStore, text: &str) -> bool {
        match store.set_item(&self.key, text) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("failed to save canvas under {}: {e}", self.key);
                false
            }
        }
    }
}
