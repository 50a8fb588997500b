//! Scene engine: the operation surface over the history store.
//!
//! Every element mutation goes through [`HistoryStore::commit`], so it is one
//! undo step. Selection changes are the deliberate exception: they write the
//! present scene directly and never enter history.
//!
//! Operations that name an unknown id are silent no-ops returning `false`.
//! Ids go stale between a UI render and the dispatch of its events, so this
//! is normal traffic, not an error.

use crate::clipboard::{Clipboard, ClipboardPayload, offset_element};
use crate::config::EditorConfig;
use crate::history::HistoryStore;
use crate::policy::{Measure, drag_bound};
use sb_core::defaults::*;
use sb_core::geom::round;
use sb_core::{
    Element, ElementDraft, ElementId, ElementKind, ElementPatch, Point, Scene, SceneError, Size,
    Stage,
};
use std::collections::HashSet;

/// The editor's scene state. Owned by the application entry point and
/// passed to whatever needs it; there is no global instance.
pub struct SceneEngine {
    history: HistoryStore,
    stage: Stage,
    config: EditorConfig,
    /// Bumped on every observable change, including selection.
    revision: u64,
}

impl Default for SceneEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SceneEngine {
    /// Create an engine with an empty scene.
    pub fn new(config: EditorConfig) -> Self {
        let history = HistoryStore::with_capacity(Scene::default(), config.history_capacity);
        Self::with_history(history, config)
    }

    /// Create an engine around existing history (e.g. restored from storage).
    ///
    /// Duplicate ids in the present scene are reassigned and a dangling
    /// selection is dropped.
    pub fn with_history(mut history: HistoryStore, config: EditorConfig) -> Self {
        history.set_capacity(config.history_capacity);
        let present = history.present_mut();
        ensure_unique_ids(present);
        present.repair_selection();
        Self {
            history,
            stage: config.stage(),
            config,
            revision: 0,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Adopt the width reported by the host container. Height stays fixed.
    pub fn set_stage_width(&mut self, width: f64) {
        self.stage.set_width(width);
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn snapshot(&self) -> &Scene {
        self.history.snapshot()
    }

    /// Elements in z-order, bottom first.
    pub fn elements(&self) -> &[Element] {
        &self.snapshot().elements
    }

    /// `(array_index, element)` pairs, topmost first, for layer lists.
    pub fn elements_top_first(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.snapshot().top_first()
    }

    /// Convert a position in the topmost-first list to an array index.
    pub fn display_index_to_array_index(&self, display_index: usize) -> Option<usize> {
        let len = self.elements().len();
        (display_index < len).then(|| len - 1 - display_index)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.snapshot().get(id)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.snapshot().selected_id
    }

    pub fn selected(&self) -> Option<&Element> {
        self.snapshot().selected()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Monotonic change counter, for hosts deciding when to save or redraw.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    fn commit(&mut self, mutate: impl FnOnce(&mut Scene)) {
        self.history.commit(mutate);
        self.revision += 1;
    }

    fn fresh_id(&self) -> ElementId {
        let scene = self.snapshot();
        ElementId::fresh(|candidate| scene.contains(candidate))
    }

    /// Append `element` on top and select it.
    fn push_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        log::debug!("add {} {}", element.element_type().as_str(), id);
        self.commit(|scene| {
            scene.elements.push(element);
            scene.selected_id = Some(id);
        });
        id
    }

    /// Add an element from a partial payload. The element gets a fresh id,
    /// lands on top, and becomes the selection.
    ///
    /// # Errors
    /// `InvalidElement` if the type or a field required by that type is
    /// missing or out of range. Nothing is mutated in that case.
    pub fn add_element(&mut self, draft: ElementDraft) -> Result<ElementId, SceneError> {
        let element = draft.into_element(self.fresh_id())?;
        Ok(self.push_element(element))
    }

    /// Shallow-merge `patch` onto the element. Values are applied as given;
    /// callers pre-clamp them through the bounds policy.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        if !self.snapshot().contains(id) {
            log::trace!("update of unknown element {id} ignored");
            return false;
        }
        self.commit(|scene| {
            if let Some(element) = scene.get_mut(id) {
                element.apply_patch(patch);
            }
        });
        true
    }

    /// Remove the element, clearing the selection if it pointed at it.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if !self.snapshot().contains(id) {
            log::trace!("remove of unknown element {id} ignored");
            return false;
        }
        self.commit(|scene| {
            scene.elements.retain(|e| e.id != id);
            if scene.selected_id == Some(id) {
                scene.selected_id = None;
            }
        });
        true
    }

    /// Move the element to z-index `to` (0 = bottom). `to` is clamped to
    /// the list length after the element is taken out.
    pub fn move_element_to_index(&mut self, id: ElementId, to: usize) -> bool {
        let Some(from) = self.snapshot().index_of(id) else {
            log::trace!("reorder of unknown element {id} ignored");
            return false;
        };
        self.commit(|scene| {
            let element = scene.elements.remove(from);
            let to = to.min(scene.elements.len());
            scene.elements.insert(to, element);
        });
        true
    }

    /// Replace the whole scene in one undoable step.
    pub fn replace_all(&mut self, mut scene: Scene) {
        ensure_unique_ids(&mut scene);
        scene.repair_selection();
        self.commit(|present| *present = scene);
    }

    /// Set or clear the selection. Not undoable. Selecting an unknown id is
    /// a no-op.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        if let Some(id) = id
            && !self.snapshot().contains(id)
        {
            log::trace!("select of unknown element {id} ignored");
            return false;
        }
        self.history.present_mut().selected_id = id;
        self.revision += 1;
        true
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.revision += 1;
        }
        changed
    }

    // ─── Selection helpers ───────────────────────────────────────────────

    pub fn delete_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.remove_element(id),
            None => false,
        }
    }

    /// Raise the selected element one layer. No-op at the top.
    pub fn move_selected_up(&mut self) -> bool {
        self.step_selected(|from, len| (from + 1).min(len - 1))
    }

    /// Lower the selected element one layer. No-op at the bottom.
    pub fn move_selected_down(&mut self) -> bool {
        self.step_selected(|from, _| from.saturating_sub(1))
    }

    fn step_selected(&mut self, target: impl FnOnce(usize, usize) -> usize) -> bool {
        let Some(id) = self.selected_id() else {
            return false;
        };
        let Some(from) = self.snapshot().index_of(id) else {
            return false;
        };
        let to = target(from, self.elements().len());
        to != from && self.move_element_to_index(id, to)
    }

    /// Move the selected element by `(dx, dy)`, kept on stage by the drag
    /// bounds. Returns `false` when nothing is selected or it can't move.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64, measure: &dyn Measure) -> bool {
        let Some(element) = self.selected() else {
            return false;
        };
        let current = element.position();
        let target = drag_bound(
            element,
            Point::new(current.x + dx, current.y + dy),
            self.stage,
            measure,
        );
        if target == current {
            return false;
        }
        let (id, patch) = (element.id, element.position_patch(target));
        self.update_element(id, &patch)
    }

    // ─── Centered adders ─────────────────────────────────────────────────
    //
    // `opts` overrides the per-type defaults; placement is always derived
    // from the current stage center.

    fn add_new(&mut self, kind: ElementKind, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        kind.validate()?;
        let mut element = Element::new(self.fresh_id(), kind);
        if let Some(rotation) = opts.rotation {
            element.rotation = rotation;
        }
        if let Some(name) = &opts.name {
            element.name = Some(name.clone());
        }
        Ok(self.push_element(element))
    }

    /// # Errors
    /// `InvalidElement` if `opts` makes the element invalid (e.g. negative size).
    pub fn add_rectangle(&mut self, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        let c = self.stage.center();
        let width = opts.width.unwrap_or(RECT_DEFAULTS.width);
        let height = opts.height.unwrap_or(RECT_DEFAULTS.height);
        let kind = ElementKind::Rect {
            x: round(c.x - width / 2.0),
            y: round(c.y - height / 2.0),
            width,
            height,
            fill: opts.fill.clone().unwrap_or_else(|| RECT_DEFAULTS.fill.to_string()),
            corner_radius: Some(opts.corner_radius.unwrap_or(RECT_DEFAULTS.corner_radius)),
        };
        self.add_new(kind, opts)
    }

    /// # Errors
    /// `InvalidElement` if `opts` makes the element invalid.
    pub fn add_circle(&mut self, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        let c = self.stage.center();
        let kind = ElementKind::Circle {
            cx: c.x,
            cy: c.y,
            radius: opts.radius.unwrap_or(CIRCLE_DEFAULTS.radius),
            fill: opts.fill.clone().unwrap_or_else(|| CIRCLE_DEFAULTS.fill.to_string()),
        };
        self.add_new(kind, opts)
    }

    /// # Errors
    /// `InvalidElement` if `opts` makes the element invalid (e.g. inner ≥ outer).
    pub fn add_ring(&mut self, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        let c = self.stage.center();
        let kind = ElementKind::Ring {
            cx: c.x,
            cy: c.y,
            inner_radius: opts.inner_radius.unwrap_or(RING_DEFAULTS.inner_radius),
            outer_radius: opts.outer_radius.unwrap_or(RING_DEFAULTS.outer_radius),
            fill: opts.fill.clone().unwrap_or_else(|| RING_DEFAULTS.fill.to_string()),
        };
        self.add_new(kind, opts)
    }

    /// # Errors
    /// `InvalidElement` if `opts` makes the element invalid.
    pub fn add_text(&mut self, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        let c = self.stage.center();
        let font_size = opts.font_size.unwrap_or(TEXT_DEFAULTS.font_size);
        let kind = ElementKind::Text {
            x: round(c.x - TEXT_CENTER_OFFSET),
            y: round(c.y - font_size / 2.0),
            text: opts.text.clone().unwrap_or_else(|| TEXT_DEFAULTS.text.to_string()),
            font_size,
            fill: opts.fill.clone().unwrap_or_else(|| TEXT_DEFAULTS.fill.to_string()),
        };
        self.add_new(kind, opts)
    }

    /// Horizontal arrow centered on the stage, as long as `opts.points`
    /// (or the default) spans horizontally.
    ///
    /// # Errors
    /// `InvalidElement` if `opts` makes the element invalid.
    pub fn add_arrow(&mut self, opts: &ElementPatch) -> Result<ElementId, SceneError> {
        let c = self.stage.center();
        let [x1, _, x2, _] = opts.points.unwrap_or(ARROW_DEFAULTS.points);
        let len = (x2 - x1).abs();
        let kind = ElementKind::Arrow {
            x: round(c.x - len / 2.0),
            y: c.y,
            points: [0.0, 0.0, len, 0.0],
            stroke: opts.stroke.clone().unwrap_or_else(|| ARROW_DEFAULTS.stroke.to_string()),
            stroke_width: opts.stroke_width.unwrap_or(ARROW_DEFAULTS.stroke_width),
        };
        self.add_new(kind, opts)
    }

    /// Place an image `image_target_width` wide, keeping its natural aspect
    /// ratio, centered on the stage.
    ///
    /// `natural` is the decoded image size; pass `None` when metadata
    /// loading failed, in which case the configured fallback ratio is used.
    ///
    /// # Errors
    /// `InvalidElement` if the configured target width is unusable.
    pub fn add_image(
        &mut self,
        src: &str,
        name: Option<&str>,
        natural: Option<Size>,
    ) -> Result<ElementId, SceneError> {
        let fallback = self.config.image_fallback_size();
        let natural = natural
            .filter(|s| {
                s.width > 0.0 && s.height > 0.0 && s.width.is_finite() && s.height.is_finite()
            })
            .unwrap_or_else(|| {
                log::debug!("no usable metadata for {src}, using fallback aspect ratio");
                fallback
            });

        let width = self.config.image_target_width;
        let height = round(width * (natural.height / natural.width));
        let c = self.stage.center();
        let kind = ElementKind::Image {
            x: c.x - round(width / 2.0),
            y: c.y - round(height / 2.0),
            width,
            height,
            src: src.to_string(),
            corner_radius: None,
        };
        let opts = ElementPatch {
            name: Some(name.unwrap_or("Image").to_string()),
            ..Default::default()
        };
        self.add_new(kind, &opts)
    }

    // ─── Clipboard ───────────────────────────────────────────────────────

    /// Serialize the selected element as clipboard text.
    pub fn copy_selected(&self) -> Option<String> {
        let element = self.selected()?.clone();
        match ClipboardPayload::new(vec![element]).to_json() {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("failed to encode clipboard payload: {e}");
                None
            }
        }
    }

    /// Serialize the selected element, then remove it.
    pub fn cut_selected(&mut self) -> Option<String> {
        let text = self.copy_selected()?;
        self.delete_selected();
        Some(text)
    }

    /// Paste the first element of a clipboard payload, offset by the
    /// configured paste offset, under a fresh id. It lands on top and
    /// becomes the selection. Returns `None` if the text is not a payload.
    pub fn paste_text(&mut self, text: &str) -> Option<ElementId> {
        let payload = ClipboardPayload::parse(text)?;
        let first = payload.elements.first()?;
        if let Err(e) = first.kind.validate() {
            log::debug!("ignoring pasted element: {e}");
            return None;
        }
        let offset = self.config.paste_offset;
        let pasted = offset_element(first, offset, offset, self.fresh_id());
        Some(self.push_element(pasted))
    }

    /// Copy the selection to a host clipboard. Failures are swallowed.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(text) = self.copy_selected() else {
            return false;
        };
        match clipboard.write_text(&text) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("copy failed: {e}");
                false
            }
        }
    }

    /// Cut the selection to a host clipboard. If writing fails the element
    /// stays in place.
    pub fn cut_to(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        self.copy_to(clipboard) && self.delete_selected()
    }

    /// Paste from a host clipboard. Read failures leave the scene unchanged.
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) -> Option<ElementId> {
        match clipboard.read_text() {
            Ok(text) => self.paste_text(&text),
            Err(e) => {
                log::debug!("paste failed: {e}");
                None
            }
        }
    }
}

/// Give every element after the first holder of an id a fresh one.
fn ensure_unique_ids(scene: &mut Scene) {
    let mut seen = HashSet::with_capacity(scene.elements.len());
    let mut duplicates = Vec::new();
    for (i, element) in scene.elements.iter().enumerate() {
        if !seen.insert(element.id) {
            duplicates.push(i);
        }
    }
    for i in duplicates {
        let id = ElementId::fresh(|candidate| seen.contains(&candidate));
        log::warn!("duplicate element id {} reassigned to {id}", scene.elements[i].id);
        seen.insert(id);
        scene.elements[i].id = id;
    }
}
