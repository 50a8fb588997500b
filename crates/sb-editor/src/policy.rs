//! Bounds & transform policy.
//!
//! Keeps every element's visual extent inside the stage during drag and
//! resize, and folds resize/rotate gestures back into the element's own
//! fields. The results are fully clamped patches; the scene engine applies
//! them without further geometric checks.
//!
//! ## Anchors
//!
//! | Type | Anchor | Extent used for clamping |
//! |------|--------|--------------------------|
//! | Rect, Image | top-left | `width × height` |
//! | Text, Arrow | top-left | measured box, else 120 × 24 (min 24 × 16) |
//! | Circle | center | `radius` |
//! | Ring | center | `outer_radius` |

use sb_core::defaults::*;
use sb_core::geom::{self, clamp, clamp_box, clamp_disc, round};
use sb_core::{Element, ElementId, ElementKind, ElementPatch, Point, Size, Stage};
use std::collections::HashMap;

// ─── Measurement ─────────────────────────────────────────────────────────

/// Runtime-measured extents of rendered nodes.
///
/// Text and arrow boxes depend on glyph metrics and stroke caps only the
/// rendering surface knows. Before the first render nothing is measured and
/// the fallback box is used.
pub trait Measure {
    fn measure_bounds(&self, id: ElementId) -> Option<Size>;
}

/// Measurement source that never has data.
pub struct Unmeasured;

impl Measure for Unmeasured {
    fn measure_bounds(&self, _id: ElementId) -> Option<Size> {
        None
    }
}

impl Measure for HashMap<ElementId, Size> {
    fn measure_bounds(&self, id: ElementId) -> Option<Size> {
        self.get(&id).copied()
    }
}

/// Approximate box of a text or arrow node for drag bounds.
fn approx_box(id: ElementId, measure: &dyn Measure) -> Size {
    let measured = measure.measure_bounds(id).unwrap_or(UNMEASURED_BOX);
    Size::new(
        measured.width.max(TEXT_MIN_BOX.width),
        measured.height.max(TEXT_MIN_BOX.height),
    )
}

// ─── Drag ────────────────────────────────────────────────────────────────

/// Clamp a candidate anchor position for `element` so it stays on stage.
///
/// `pos` is the top-left corner for box-anchored types and the center for
/// circles and rings.
pub fn drag_bound(element: &Element, pos: Point, stage: Stage, measure: &dyn Measure) -> Point {
    let stage = stage.size();
    match &element.kind {
        ElementKind::Rect { width, height, .. } | ElementKind::Image { width, height, .. } => {
            clamp_box(pos, Size::new(*width, *height), stage)
        }
        ElementKind::Text { .. } | ElementKind::Arrow { .. } => {
            clamp_box(pos, approx_box(element.id, measure), stage)
        }
        ElementKind::Circle { radius, .. } => clamp_disc(pos, *radius, stage),
        ElementKind::Ring { outer_radius, .. } => clamp_disc(pos, *outer_radius, stage),
    }
}

// ─── Resize / rotate ─────────────────────────────────────────────────────

/// Terminal state of a resize/rotate gesture as reported by the rendering
/// surface: the node's residual scale, its rotation, and its anchor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformGesture {
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotation: f64,
    pub x: f64,
    pub y: f64,
}

impl TransformGesture {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Fold a transform gesture into a clamped patch for `element`.
///
/// The size change is absorbed into the element's own fields, so the host
/// must reset the node's scale to 1 after applying the patch. Rotation is
/// stored verbatim.
pub fn normalize_transform(
    element: &Element,
    gesture: &TransformGesture,
    stage: Stage,
    measure: &dyn Measure,
) -> ElementPatch {
    let TransformGesture {
        scale_x: sx,
        scale_y: sy,
        rotation,
        ..
    } = *gesture;
    let stage = stage.size();
    let mut patch = ElementPatch {
        rotation: Some(rotation),
        ..Default::default()
    };

    match &element.kind {
        ElementKind::Rect { width, height, .. } => {
            let size = scaled_box(*width, *height, sx, sy, RECT_MIN);
            set_box(&mut patch, clamp_box(gesture.position(), size, stage), size);
        }
        ElementKind::Image { width, height, .. } => {
            let size = scaled_box(*width, *height, sx, sy, IMAGE_MIN);
            set_box(&mut patch, clamp_box(gesture.position(), size, stage), size);
        }
        ElementKind::Circle { radius, .. } => {
            let r = CIRCLE_MIN_RADIUS.max(round(radius * sx.max(sy)));
            let center = clamp_disc(gesture.position(), r, stage);
            patch.cx = Some(center.x);
            patch.cy = Some(center.y);
            patch.radius = Some(r);
        }
        ElementKind::Ring {
            inner_radius,
            outer_radius,
            ..
        } => {
            let (inner, outer) = scaled_ring(*inner_radius, *outer_radius, sx.max(sy));
            let center = clamp_disc(gesture.position(), outer, stage);
            patch.cx = Some(center.x);
            patch.cy = Some(center.y);
            patch.inner_radius = Some(inner);
            patch.outer_radius = Some(outer);
        }
        ElementKind::Text { font_size, .. } => {
            let new_font_size = TEXT_MIN_FONT_SIZE.max(round(font_size * sy));
            let measured = measure.measure_bounds(element.id);
            let width = TEXT_MIN_BOX
                .width
                .max(round(measured.map_or(UNMEASURED_BOX.width, |m| m.width) * sx));
            // The node still carries the full gesture scale; divide out the
            // part already absorbed into the font size.
            let absorbed = new_font_size / font_size;
            let height = TEXT_MIN_BOX
                .height
                .max(round(measured.map_or(new_font_size, |m| m.height) * (sy / absorbed)));
            let pos = clamp_box(gesture.position(), Size::new(width, height), stage);
            patch.x = Some(pos.x);
            patch.y = Some(pos.y);
            patch.font_size = Some(new_font_size);
        }
        ElementKind::Arrow { points, .. } => {
            let [x1, y1, x2, y2] = *points;
            let dx = (x2 - x1) * sx;
            let dy = (y2 - y1) * sy;
            let bbox = geom::arrow_bbox_from_points(x1, y1, x1 + dx, y1 + dy);
            let size = Size::new(
                bbox.width.max(ARROW_MIN_BBOX.width),
                bbox.height.max(ARROW_MIN_BBOX.height),
            );
            let pos = clamp_box(gesture.position(), size, stage);
            patch.x = Some(pos.x);
            patch.y = Some(pos.y);
            patch.points = Some([x1, y1, x1 + dx, y1 + dy]);
        }
    }
    patch
}

fn scaled_box(width: f64, height: f64, sx: f64, sy: f64, min: Size) -> Size {
    Size::new(
        min.width.max(round(width * sx)),
        min.height.max(round(height * sy)),
    )
}

fn set_box(patch: &mut ElementPatch, pos: Point, size: Size) {
    patch.x = Some(pos.x);
    patch.y = Some(pos.y);
    patch.width = Some(size.width);
    patch.height = Some(size.height);
}

/// Scale a ring uniformly, keeping the inner/outer ratio and `inner < outer`.
fn scaled_ring(inner: f64, outer: f64, scale: f64) -> (f64, f64) {
    let new_outer = RING_MIN_OUTER.max(round(outer * scale));
    let ratio = if outer > 0.0 { inner / outer } else { 0.0 };
    let new_inner = RING_MIN_INNER
        .max(round(new_outer * ratio))
        .min(new_outer - 1.0);
    (new_inner, new_outer)
}

// ─── Inspector values ────────────────────────────────────────────────────

/// Inner radius entered for a ring, kept in `[1, outer - 2]`.
pub fn clamp_inner_radius(outer_radius: f64, value: f64) -> f64 {
    clamp(value, 1.0, (outer_radius - 2.0).max(1.0))
}

/// Corner radius entered in the inspector, kept in `[0, 64]`.
pub fn clamp_corner_radius(value: f64) -> f64 {
    clamp(value, 0.0, CORNER_RADIUS_MAX)
}

/// Corner radius after flipping the "rounded corners" toggle.
pub fn rounded_corner_toggle(on: bool, current: Option<f64>) -> f64 {
    if on {
        CORNER_RADIUS_ROUNDED_MIN.max(current.unwrap_or(CORNER_RADIUS_ROUNDED_DEFAULT))
    } else {
        0.0
    }
}
