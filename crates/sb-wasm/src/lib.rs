//! WASM bridge for Sketchboard: exposes the scene engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page's rendering
//! surface draws `elements_json()` and reports gestures back; toolbar,
//! inspector and layer panel call the operations below.

mod storage;

use sb_core::{ElementDraft, ElementId, ElementPatch, Point, Size};
use sb_editor::persist::load_engine;
use sb_editor::policy::{clamp_corner_radius, clamp_inner_radius, rounded_corner_toggle};
use sb_editor::{
    Autosave, EditorConfig, KeyModifiers, KeyValueStore, MemoryClipboard, SceneEngine,
    ShortcutAction, ShortcutMap, TransformGesture,
};
use serde_json::json;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Owns the engine, the measurement cache for text/arrow nodes, the
/// autosave state and its store. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct SceneCanvas {
    engine: SceneEngine,
    /// Rendered sizes of text/arrow nodes, filled by the host after render.
    measured: HashMap<ElementId, Size>,
    store: Box<dyn KeyValueStore>,
    autosave: Autosave,
    /// Fallback for keyboard copy/paste when the page has no clipboard access.
    clipboard: MemoryClipboard,
}

#[wasm_bindgen]
impl SceneCanvas {
    /// Create the controller for a stage `width` wide, restoring the saved
    /// canvas. `config_json` is an optional `EditorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, config_json: Option<String>) -> Self {
        console_error_panic_hook_setup();

        let mut config = match config_json.as_deref().map(EditorConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                console_warn(&format!("invalid editor config, using defaults: {e}"));
                EditorConfig::default()
            }
            None => EditorConfig::default(),
        };
        config.stage_width = width;

        let store = storage::open_store();
        let (engine, outcome) = load_engine(store.as_ref(), config);
        log::debug!("canvas loaded: {outcome:?}");
        let autosave = Autosave::from_config(&engine);

        Self {
            engine,
            measured: HashMap::new(),
            store,
            autosave,
            clipboard: MemoryClipboard::new(),
        }
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    /// Adopt the container width. Height stays fixed.
    pub fn set_stage_width(&mut self, width: f64) {
        self.engine.set_stage_width(width);
    }

    pub fn stage_width(&self) -> f64 {
        self.engine.stage().width
    }

    pub fn stage_height(&self) -> f64 {
        self.engine.stage().height
    }

    /// Record the rendered size of a text or arrow node.
    pub fn set_measured_bounds(&mut self, id: &str, width: f64, height: f64) {
        self.measured.insert(ElementId::intern(id), Size::new(width, height));
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Current scene as `{"elements":[...],"selectedId":...}`.
    pub fn elements_json(&self) -> String {
        serde_json::to_string(self.engine.snapshot()).unwrap_or_else(|_| {
            r#"{"elements":[],"selectedId":null}"#.to_string()
        })
    }

    /// Element ids topmost first, for the layer panel.
    pub fn layer_ids(&self) -> js_sys::Array {
        self.engine
            .elements_top_first()
            .map(|(_, el)| JsValue::from_str(el.id.as_str()))
            .collect()
    }

    /// Layer panel rows topmost first, as
    /// `[{"id": "...", "title": "...", "index": n}]` where `index` is the
    /// z-order position.
    pub fn layers_json(&self) -> String {
        let rows: Vec<_> = self
            .engine
            .elements_top_first()
            .map(|(index, el)| {
                serde_json::json!({
                    "id": el.id.as_str(),
                    "title": el.display_name(),
                    "index": index,
                })
            })
            .collect();
        serde_json::Value::Array(rows).to_string()
    }

    /// Array index of the row at `display_index` in the layer panel, or -1.
    pub fn display_index_to_array_index(&self, display_index: usize) -> i32 {
        self.engine
            .display_index_to_array_index(display_index)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.engine.selected_id().map(|id| id.as_str().to_string())
    }

    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    pub fn revision(&self) -> f64 {
        self.engine.revision() as f64
    }

    // ─── Element operations ──────────────────────────────────────────────

    /// Add an element from a JSON payload with a `type` field.
    /// Returns `{"ok":true,"id":"..."}` or `{"ok":false,"error":"..."}`.
    pub fn add_element(&mut self, json: &str) -> String {
        let result = ElementDraft::from_json(json).and_then(|d| self.engine.add_element(d));
        add_result(result)
    }

    pub fn add_rectangle(&mut self, opts_json: Option<String>) -> String {
        match parse_patch(opts_json.as_deref()) {
            Ok(opts) => add_result(self.engine.add_rectangle(&opts)),
            Err(e) => error_json(&e),
        }
    }

    pub fn add_circle(&mut self, opts_json: Option<String>) -> String {
        match parse_patch(opts_json.as_deref()) {
            Ok(opts) => add_result(self.engine.add_circle(&opts)),
            Err(e) => error_json(&e),
        }
    }

    pub fn add_ring(&mut self, opts_json: Option<String>) -> String {
        match parse_patch(opts_json.as_deref()) {
            Ok(opts) => add_result(self.engine.add_ring(&opts)),
            Err(e) => error_json(&e),
        }
    }

    pub fn add_text(&mut self, opts_json: Option<String>) -> String {
        match parse_patch(opts_json.as_deref()) {
            Ok(opts) => add_result(self.engine.add_text(&opts)),
            Err(e) => error_json(&e),
        }
    }

    pub fn add_arrow(&mut self, opts_json: Option<String>) -> String {
        match parse_patch(opts_json.as_deref()) {
            Ok(opts) => add_result(self.engine.add_arrow(&opts)),
            Err(e) => error_json(&e),
        }
    }

    /// Place an uploaded image. Pass `0` for both natural dimensions when
    /// the image metadata failed to load.
    pub fn add_image(
        &mut self,
        src: &str,
        name: Option<String>,
        natural_width: f64,
        natural_height: f64,
    ) -> String {
        let natural = (natural_width > 0.0 && natural_height > 0.0)
            .then(|| Size::new(natural_width, natural_height));
        add_result(self.engine.add_image(src, name.as_deref(), natural))
    }

    /// Shallow-merge a JSON patch onto an element. Returns whether it changed.
    /// An empty patch records nothing.
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> bool {
        match serde_json::from_str::<ElementPatch>(patch_json) {
            Ok(patch) if patch.is_empty() => false,
            Ok(patch) => self.engine.update_element(ElementId::intern(id), &patch),
            Err(e) => {
                console_warn(&format!("ignoring malformed patch for {id}: {e}"));
                false
            }
        }
    }

    pub fn remove_element(&mut self, id: &str) -> bool {
        self.engine.remove_element(ElementId::intern(id))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.engine.delete_selected()
    }

    pub fn move_element_to_index(&mut self, id: &str, to: usize) -> bool {
        self.engine.move_element_to_index(ElementId::intern(id), to)
    }

    pub fn move_selected_up(&mut self) -> bool {
        self.engine.move_selected_up()
    }

    pub fn move_selected_down(&mut self) -> bool {
        self.engine.move_selected_down()
    }

    /// Select an element, or clear the selection with `undefined`.
    pub fn select(&mut self, id: Option<String>) -> bool {
        self.engine.select(id.as_deref().map(ElementId::intern))
    }

    pub fn undo(&mut self) -> bool {
        self.engine.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.engine.redo()
    }

    // ─── Gestures ────────────────────────────────────────────────────────

    /// Clamp a provisional drag position. Returns `[x, y]`.
    pub fn drag_bound(&self, id: &str, x: f64, y: f64) -> Vec<f64> {
        let p = self
            .engine
            .drag_bound_for(ElementId::intern(id), Point::new(x, y), &self.measured);
        vec![p.x, p.y]
    }

    pub fn on_drag_end(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.engine
            .on_drag_end(ElementId::intern(id), Point::new(x, y), &self.measured)
    }

    /// Commit a finished resize/rotate. Returns the applied patch as JSON
    /// (the host resets the node scale to 1 and syncs from it), or `null`.
    pub fn on_transform_end(
        &mut self,
        id: &str,
        scale_x: f64,
        scale_y: f64,
        rotation: f64,
        x: f64,
        y: f64,
    ) -> String {
        let gesture = TransformGesture {
            scale_x,
            scale_y,
            rotation,
            x,
            y,
        };
        self.engine
            .on_transform_end(ElementId::intern(id), &gesture, &self.measured)
            .and_then(|patch| serde_json::to_string(&patch).ok())
            .unwrap_or_else(|| "null".to_string())
    }

    pub fn on_stage_background_click(&mut self) {
        self.engine.on_stage_background_click();
    }

    // ─── Keyboard & clipboard ────────────────────────────────────────────

    /// Handle a key event. Returns
    /// `{"changed":bool,"action":"undo"|...|"none","clipboard":string|null}`;
    /// `clipboard` carries copied text for the host to mirror to the system
    /// clipboard.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        in_text_entry: bool,
    ) -> String {
        let mods = KeyModifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        let Some(action) = ShortcutMap::resolve(key, mods, in_text_entry) else {
            return r#"{"changed":false,"action":"none","clipboard":null}"#.to_string();
        };

        let changed = self
            .engine
            .apply_shortcut(action, &mut self.clipboard, &self.measured);
        let clipboard = match action {
            ShortcutAction::Copy | ShortcutAction::Cut => self.clipboard.text().map(str::to_string),
            _ => None,
        };
        json!({
            "changed": changed,
            "action": action.name(),
            "clipboard": clipboard,
        })
        .to_string()
    }

    /// Clipboard text for the selected element, if any.
    pub fn copy_selected(&mut self) -> Option<String> {
        if !self.engine.copy_to(&mut self.clipboard) {
            return None;
        }
        self.clipboard.text().map(str::to_string)
    }

    /// Like `copy_selected`, then removes the element in the same call. The
    /// host writes the returned text to the system clipboard afterwards.
    pub fn cut_selected(&mut self) -> Option<String> {
        let text = self.copy_selected()?;
        self.engine.delete_selected();
        Some(text)
    }

    /// Paste clipboard text. Returns the new element's id, or nothing when
    /// the text is not a canvas payload.
    pub fn paste(&mut self, text: &str) -> Option<String> {
        self.engine
            .paste_text(text)
            .map(|id| id.as_str().to_string())
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Drive debounced saving; call from `requestAnimationFrame` or a timer.
    /// Returns whether a save was written.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.autosave.tick(&self.engine, self.store.as_mut(), now_ms)
    }

    /// Write any pending save immediately (e.g. on `pagehide`).
    pub fn flush_save(&mut self) -> bool {
        self.autosave.flush(self.store.as_mut())
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn parse_patch(json: Option<&str>) -> Result<ElementPatch, String> {
    match json {
        None => Ok(ElementPatch::default()),
        Some(json) if json.trim().is_empty() => Ok(ElementPatch::default()),
        Some(json) => serde_json::from_str(json).map_err(|e| e.to_string()),
    }
}

fn add_result(result: Result<ElementId, sb_core::SceneError>) -> String {
    match result {
        Ok(id) => json!({ "ok": true, "id": id.as_str() }).to_string(),
        Err(e) => error_json(&e.to_string()),
    }
}

fn error_json(error: &str) -> String {
    json!({ "ok": false, "error": error }).to_string()
}

pub(crate) fn console_warn(msg: &str) {
    log::warn!("{msg}");
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sketchboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Inspector helpers (no canvas needed) ────────────────────────────────

/// Ring inner radius from the inspector, kept in `[1, outer - 2]`.
#[wasm_bindgen(js_name = clampInnerRadius)]
pub fn clamp_inner_radius_js(outer_radius: f64, value: f64) -> f64 {
    clamp_inner_radius(outer_radius, value)
}

#[wasm_bindgen(js_name = clampCornerRadius)]
pub fn clamp_corner_radius_js(value: f64) -> f64 {
    clamp_corner_radius(value)
}

/// Corner radius after toggling "rounded". `current` is `undefined` when
/// the element has no radius yet.
#[wasm_bindgen(js_name = roundedCornerToggle)]
pub fn rounded_corner_toggle_js(on: bool, current: Option<f64>) -> f64 {
    rounded_corner_toggle(on, current)
}
