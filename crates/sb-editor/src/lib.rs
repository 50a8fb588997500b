pub mod clipboard;
pub mod config;
pub mod demo;
pub mod engine;
pub mod gesture;
pub mod history;
pub mod persist;
pub mod policy;
pub mod shortcuts;

pub use clipboard::{Clipboard, ClipboardError, ClipboardPayload, MemoryClipboard};
pub use config::EditorConfig;
pub use engine::SceneEngine;
pub use gesture::GestureEvent;
pub use history::HistoryStore;
pub use persist::{Autosave, KeyValueStore, LoadOutcome, MemoryStore, PersistError, SaveDebouncer};
pub use policy::{Measure, TransformGesture, Unmeasured};
pub use shortcuts::{KeyModifiers, ShortcutAction, ShortcutMap};
