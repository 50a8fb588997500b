//! Editor configuration.
//!
//! Loaded from JSON by hosts; every field is optional and falls back to the
//! defaults below.

use crate::history::DEFAULT_CAPACITY;
use sb_core::{STAGE_HEIGHT, Size, Stage};
use serde::{Deserialize, Serialize};

/// Configuration for a [`SceneEngine`](crate::engine::SceneEngine) and its
/// persistence/clipboard adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Initial stage width. Default: **800**.
    pub stage_width: f64,

    /// Stage height. Fixed for the editor's lifetime. Default: **620**.
    pub stage_height: f64,

    /// Snapshots kept in each history direction. Default: **10**.
    pub history_capacity: usize,

    /// Offset applied on both axes to pasted elements. Default: **16**.
    pub paste_offset: f64,

    /// Durable slot holding the saved scene. Default: **`canvas-v1`**.
    pub storage_key: String,

    /// Quiet period before a pending save is written. Default: **300 ms**.
    pub save_debounce_ms: f64,

    /// Width new images are placed at. Default: **200**.
    pub image_target_width: f64,

    /// Natural size assumed when image metadata is unavailable.
    /// Default: **200 × 220**.
    pub image_fallback_width: f64,
    pub image_fallback_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stage_width: 800.0,
            stage_height: STAGE_HEIGHT,
            history_capacity: DEFAULT_CAPACITY,
            paste_offset: 16.0,
            storage_key: "canvas-v1".to_string(),
            save_debounce_ms: 300.0,
            image_target_width: 200.0,
            image_fallback_width: 200.0,
            image_fallback_height: 220.0,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    /// Returns the serde error if the JSON is malformed or a field has the
    /// wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn stage(&self) -> Stage {
        Stage::new(self.stage_width, self.stage_height)
    }

    pub fn image_fallback_size(&self) -> Size {
        Size::new(self.image_fallback_width, self.image_fallback_height)
    }
}
