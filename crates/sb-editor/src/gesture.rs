//! Gesture dispatch from the rendering surface.
//!
//! The surface animates drags and resizes on its own nodes and reports only
//! terminal events here, so each gesture is at most one history entry.
//! During a drag it calls [`SceneEngine::drag_bound_for`] every frame to keep
//! the provisional node position on stage.

use crate::engine::SceneEngine;
use crate::policy::{Measure, TransformGesture, drag_bound, normalize_transform};
use sb_core::{ElementId, ElementPatch, Point};

/// Terminal gesture events reported by the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    DragEnd { id: ElementId, x: f64, y: f64 },
    TransformEnd { id: ElementId, gesture: TransformGesture },
    Select { id: ElementId },
    StageBackgroundClick,
}

impl SceneEngine {
    /// Clamp a provisional drag position for `id`. Unknown ids pass through.
    pub fn drag_bound_for(&self, id: ElementId, pos: Point, measure: &dyn Measure) -> Point {
        match self.get(id) {
            Some(element) => drag_bound(element, pos, self.stage(), measure),
            None => pos,
        }
    }

    /// Commit the final position of a drag, clamped to the stage.
    pub fn on_drag_end(&mut self, id: ElementId, pos: Point, measure: &dyn Measure) -> bool {
        let Some(element) = self.get(id) else {
            log::trace!("drag end for unknown element {id} ignored");
            return false;
        };
        let target = drag_bound(element, pos, self.stage(), measure);
        let patch = element.position_patch(target);
        self.update_element(id, &patch)
    }

    /// Fold a finished resize/rotate into the element.
    ///
    /// Returns the applied patch so the host can sync its node and reset the
    /// node's scale to 1.
    pub fn on_transform_end(
        &mut self,
        id: ElementId,
        gesture: &TransformGesture,
        measure: &dyn Measure,
    ) -> Option<ElementPatch> {
        let Some(element) = self.get(id) else {
            log::trace!("transform end for unknown element {id} ignored");
            return None;
        };
        let patch = normalize_transform(element, gesture, self.stage(), measure);
        self.update_element(id, &patch).then_some(patch)
    }

    pub fn on_select(&mut self, id: ElementId) -> bool {
        self.select(Some(id))
    }

    /// A click on empty stage clears the selection.
    pub fn on_stage_background_click(&mut self) {
        self.clear_selection();
    }

    /// Route a gesture event. Returns whether the scene changed.
    pub fn handle_gesture(&mut self, event: GestureEvent, measure: &dyn Measure) -> bool {
        match event {
            GestureEvent::DragEnd { id, x, y } => self.on_drag_end(id, Point::new(x, y), measure),
            GestureEvent::TransformEnd { id, gesture } => {
                self.on_transform_end(id, &gesture, measure).is_some()
            }
            GestureEvent::Select { id } => self.on_select(id),
            GestureEvent::StageBackgroundClick => {
                let had_selection = self.selected_id().is_some();
                self.on_stage_background_click();
                had_selection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Unmeasured;
    use pretty_assertions::assert_eq;
    use sb_core::ElementKind;

    #[test]
    fn drag_end_clamps_and_commits_once() {
        let mut engine = SceneEngine::default();
        let id = engine.add_rectangle(&ElementPatch::default()).unwrap();
        let past = engine.history().past_len();

        assert!(engine.on_drag_end(id, Point::new(1000.0, -50.0), &Unmeasured));
        assert_eq!(engine.get(id).unwrap().position(), Point::new(480.0, 0.0));
        assert_eq!(engine.history().past_len(), past + 1);
    }

    #[test]
    fn drag_bound_for_unknown_passes_through() {
        let engine = SceneEngine::default();
        let pos = Point::new(-5.0, 9000.0);
        assert_eq!(engine.drag_bound_for(ElementId::intern("gone"), pos, &Unmeasured), pos);
    }

    #[test]
    fn transform_end_absorbs_scale() {
        let mut engine = SceneEngine::default();
        let id = engine.add_circle(&ElementPatch::default()).unwrap();
        let gesture = TransformGesture {
            scale_x: 1.5,
            scale_y: 1.2,
            rotation: 30.0,
            x: 400.0,
            y: 310.0,
        };
        let patch = engine.on_transform_end(id, &gesture, &Unmeasured).unwrap();
        assert_eq!(patch.radius, Some(60.0));

        let el = engine.get(id).unwrap();
        assert_eq!(el.rotation, 30.0);
        match el.kind {
            ElementKind::Circle { radius, .. } => assert_eq!(radius, 60.0),
            _ => panic!("expected Circle"),
        }
    }

    #[test]
    fn background_click_clears_without_history() {
        let mut engine = SceneEngine::default();
        engine.add_ring(&ElementPatch::default()).unwrap();
        let past = engine.history().past_len();
        assert!(engine.handle_gesture(GestureEvent::StageBackgroundClick, &Unmeasured));
        assert_eq!(engine.selected_id(), None);
        assert_eq!(engine.history().past_len(), past);
        assert!(!engine.handle_gesture(GestureEvent::StageBackgroundClick, &Unmeasured));
    }

    #[test]
    fn select_event_routes_to_select() {
        let mut engine = SceneEngine::default();
        let a = engine.add_ring(&ElementPatch::default()).unwrap();
        engine.add_text(&ElementPatch::default()).unwrap();
        assert!(engine.handle_gesture(GestureEvent::Select { id: a }, &Unmeasured));
        assert_eq!(engine.selected_id(), Some(a));
    }
}
