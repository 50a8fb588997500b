//! Integration tests: drag and resize gestures keep elements on stage.
//!
//! Drives the engine the way the rendering surface does: provisional drag
//! positions through `drag_bound_for`, terminal events through the
//! gesture handlers.

use pretty_assertions::assert_eq;
use sb_core::{ElementDraft, ElementKind, ElementPatch, ElementType, Point, Size};
use sb_editor::{EditorConfig, GestureEvent, SceneEngine, TransformGesture, Unmeasured};
use std::collections::HashMap;

fn engine_with_width(width: f64) -> SceneEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = SceneEngine::new(EditorConfig::default());
    engine.set_stage_width(width);
    engine
}

fn add(engine: &mut SceneEngine, ty: ElementType, fields: ElementPatch) -> sb_core::ElementId {
    engine.add_element(ElementDraft::new(ty, fields)).unwrap()
}

#[test]
fn rect_dragged_past_right_edge_stops_at_edge() {
    let mut engine = engine_with_width(500.0);
    let id = add(
        &mut engine,
        ElementType::Rect,
        ElementPatch {
            x: Some(0.0),
            y: Some(0.0),
            width: Some(100.0),
            height: Some(40.0),
            fill: Some("#fff".into()),
            ..Default::default()
        },
    );

    let provisional = engine.drag_bound_for(id, Point::new(1000.0, 20.0), &Unmeasured);
    assert_eq!(provisional, Point::new(400.0, 20.0));

    let event = GestureEvent::DragEnd {
        id,
        x: 1000.0,
        y: 20.0,
    };
    assert!(engine.handle_gesture(event, &Unmeasured));
    assert_eq!(engine.get(id).unwrap().position(), Point::new(400.0, 20.0));
}

#[test]
fn circle_dragged_above_stage_stops_at_radius() {
    let mut engine = engine_with_width(800.0);
    let id = add(
        &mut engine,
        ElementType::Circle,
        ElementPatch {
            cx: Some(200.0),
            cy: Some(200.0),
            radius: Some(50.0),
            fill: Some("#fff".into()),
            ..Default::default()
        },
    );
    assert!(engine.on_drag_end(id, Point::new(200.0, -20.0), &Unmeasured));
    assert_eq!(engine.get(id).unwrap().position(), Point::new(200.0, 50.0));
}

#[test]
fn shrinking_stage_changes_future_clamps_only() {
    let mut engine = engine_with_width(800.0);
    let id = engine.add_rectangle(&ElementPatch::default()).unwrap();
    engine.set_stage_width(400.0);

    // Existing geometry is untouched until the next gesture.
    assert_eq!(engine.get(id).unwrap().position(), Point::new(240.0, 210.0));
    assert_eq!(
        engine.drag_bound_for(id, Point::new(240.0, 210.0), &Unmeasured),
        Point::new(80.0, 210.0)
    );
}

#[test]
fn ring_transform_preserves_ratio_through_engine() {
    let mut engine = engine_with_width(800.0);
    let id = engine.add_ring(&ElementPatch::default()).unwrap();
    let gesture = TransformGesture {
        scale_x: 2.0,
        scale_y: 2.0,
        rotation: 0.0,
        x: 400.0,
        y: 310.0,
    };
    engine.on_transform_end(id, &gesture, &Unmeasured).unwrap();
    match &engine.get(id).unwrap().kind {
        ElementKind::Ring {
            inner_radius,
            outer_radius,
            ..
        } => {
            assert_eq!((*inner_radius, *outer_radius), (40.0, 80.0));
        }
        other => panic!("expected Ring, got {other:?}"),
    }
}

#[test]
fn text_transform_uses_measured_bounds() {
    let mut engine = engine_with_width(800.0);
    let id = engine.add_text(&ElementPatch::default()).unwrap();
    let mut measured = HashMap::new();
    measured.insert(id, Size::new(300.0, 20.0));

    let gesture = TransformGesture {
        scale_x: 2.0,
        scale_y: 2.0,
        rotation: 12.0,
        x: 700.0,
        y: 100.0,
    };
    let patch = engine.on_transform_end(id, &gesture, &measured).unwrap();
    assert_eq!(patch.font_size, Some(36.0));
    // 600 wide after scaling: x clamps to 800 - 600
    assert_eq!(patch.x, Some(200.0));
    assert_eq!(engine.get(id).unwrap().rotation, 12.0);
}

#[test]
fn transform_of_unknown_element_is_ignored() {
    let mut engine = engine_with_width(800.0);
    engine.add_circle(&ElementPatch::default()).unwrap();
    let revision = engine.revision();
    let gesture = TransformGesture {
        scale_x: 2.0,
        scale_y: 2.0,
        rotation: 0.0,
        x: 0.0,
        y: 0.0,
    };
    let missing = sb_core::ElementId::intern("removed-elsewhere");
    assert_eq!(engine.on_transform_end(missing, &gesture, &Unmeasured), None);
    assert_eq!(engine.revision(), revision);
}
