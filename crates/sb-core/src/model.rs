//! Element data model for Sketchboard scenes.
//!
//! A scene is a flat, ordered list of elements: array index is z-order and
//! the last element is drawn on top. Every element shares an id, a rotation
//! and an optional display name; the geometry lives in [`ElementKind`],
//! one variant per element type with exactly the fields that type needs.

use crate::error::SceneError;
use crate::id::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Element types ───────────────────────────────────────────────────────

/// Discriminant of an element, as it appears in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Rect,
    Circle,
    Image,
    Arrow,
    Text,
    Ring,
}

/// Whether an element's position describes its top-left corner or its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

impl ElementType {
    /// Name given to new elements that don't bring their own.
    pub fn default_name(self) -> &'static str {
        match self {
            ElementType::Rect => "Rectangle",
            ElementType::Circle => "Circle",
            ElementType::Image => "Image",
            ElementType::Arrow => "Arrow",
            ElementType::Text => "Text",
            ElementType::Ring => "Ring",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Rect => "rect",
            ElementType::Circle => "circle",
            ElementType::Image => "image",
            ElementType::Arrow => "arrow",
            ElementType::Text => "text",
            ElementType::Ring => "ring",
        }
    }

    pub fn anchor(self) -> Anchor {
        match self {
            ElementType::Circle | ElementType::Ring => Anchor::Center,
            _ => Anchor::TopLeft,
        }
    }
}

// ─── Element ─────────────────────────────────────────────────────────────

/// Variant-specific geometry and paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    #[serde(rename_all = "camelCase")]
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corner_radius: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        corner_radius: Option<f64>,
    },
    /// `points` are `[x1, y1, x2, y2]`, local to the `(x, y)` origin.
    #[serde(rename_all = "camelCase")]
    Arrow {
        x: f64,
        y: f64,
        points: [f64; 4],
        stroke: String,
        stroke_width: f64,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: String,
    },
    #[serde(rename_all = "camelCase")]
    Ring {
        cx: f64,
        cy: f64,
        inner_radius: f64,
        outer_radius: f64,
        fill: String,
    },
}

/// A single element on the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Degrees, stored verbatim from the transform gesture.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Rect { .. } => ElementType::Rect,
            ElementKind::Circle { .. } => ElementType::Circle,
            ElementKind::Image { .. } => ElementType::Image,
            ElementKind::Arrow { .. } => ElementType::Arrow,
            ElementKind::Text { .. } => ElementType::Text,
            ElementKind::Ring { .. } => ElementType::Ring,
        }
    }

    /// Check the value invariants of the variant: finite coordinates,
    /// non-negative sizes, and `inner_radius < outer_radius` for rings.
    pub fn validate(&self) -> Result<(), SceneError> {
        let (coords, sizes): (Vec<(&str, f64)>, Vec<(&str, f64)>) = match self {
            ElementKind::Rect {
                x,
                y,
                width,
                height,
                corner_radius,
                ..
            }
            | ElementKind::Image {
                x,
                y,
                width,
                height,
                corner_radius,
                ..
            } => (
                vec![("x", *x), ("y", *y)],
                vec![
                    ("width", *width),
                    ("height", *height),
                    ("cornerRadius", corner_radius.unwrap_or(0.0)),
                ],
            ),
            ElementKind::Circle { cx, cy, radius, .. } => {
                (vec![("cx", *cx), ("cy", *cy)], vec![("radius", *radius)])
            }
            ElementKind::Arrow {
                x,
                y,
                points,
                stroke_width,
                ..
            } => (
                vec![
                    ("x", *x),
                    ("y", *y),
                    ("points[0]", points[0]),
                    ("points[1]", points[1]),
                    ("points[2]", points[2]),
                    ("points[3]", points[3]),
                ],
                vec![("strokeWidth", *stroke_width)],
            ),
            ElementKind::Text {
                x, y, font_size, ..
            } => (vec![("x", *x), ("y", *y)], vec![("fontSize", *font_size)]),
            ElementKind::Ring {
                cx,
                cy,
                inner_radius,
                outer_radius,
                ..
            } => {
                if inner_radius >= outer_radius {
                    return Err(SceneError::invalid(format!(
                        "ring innerRadius {inner_radius} must be below outerRadius {outer_radius}"
                    )));
                }
                (
                    vec![("cx", *cx), ("cy", *cy)],
                    vec![("innerRadius", *inner_radius), ("outerRadius", *outer_radius)],
                )
            }
        };

        for (field, value) in coords.iter().chain(sizes.iter()) {
            if !value.is_finite() {
                return Err(SceneError::invalid(format!("`{field}` is not a finite number")));
            }
        }
        for (field, value) in sizes {
            if value < 0.0 {
                return Err(SceneError::invalid(format!("`{field}` must not be negative")));
            }
        }
        Ok(())
    }
}

impl Element {
    /// Wrap a kind with rotation 0 and the type's default name.
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        let name = kind.element_type().default_name().to_string();
        Self {
            id,
            rotation: 0.0,
            name: Some(name),
            kind,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Sidebar title: the name, or the capitalized type.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let ty = self.element_type().as_str();
        let mut chars = ty.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Anchor position: top-left for box types, center for circle/ring.
    pub fn position(&self) -> Point {
        match &self.kind {
            ElementKind::Rect { x, y, .. }
            | ElementKind::Image { x, y, .. }
            | ElementKind::Arrow { x, y, .. }
            | ElementKind::Text { x, y, .. } => Point::new(*x, *y),
            ElementKind::Circle { cx, cy, .. } | ElementKind::Ring { cx, cy, .. } => {
                Point::new(*cx, *cy)
            }
        }
    }

    pub fn set_position(&mut self, pos: Point) {
        match &mut self.kind {
            ElementKind::Rect { x, y, .. }
            | ElementKind::Image { x, y, .. }
            | ElementKind::Arrow { x, y, .. }
            | ElementKind::Text { x, y, .. } => {
                *x = pos.x;
                *y = pos.y;
            }
            ElementKind::Circle { cx, cy, .. } | ElementKind::Ring { cx, cy, .. } => {
                *cx = pos.x;
                *cy = pos.y;
            }
        }
    }

    /// Patch that moves this element's anchor to `pos`.
    pub fn position_patch(&self, pos: Point) -> ElementPatch {
        match self.element_type().anchor() {
            Anchor::TopLeft => ElementPatch {
                x: Some(pos.x),
                y: Some(pos.y),
                ..Default::default()
            },
            Anchor::Center => ElementPatch {
                cx: Some(pos.x),
                cy: Some(pos.y),
                ..Default::default()
            },
        }
    }

    /// Shallow-merge `patch` onto this element. `id` and type never change;
    /// fields the variant doesn't carry are ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        merge(&mut self.rotation, &patch.rotation);
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }

        match &mut self.kind {
            ElementKind::Rect {
                x,
                y,
                width,
                height,
                fill,
                corner_radius,
            } => {
                merge(x, &patch.x);
                merge(y, &patch.y);
                merge(width, &patch.width);
                merge(height, &patch.height);
                merge(fill, &patch.fill);
                if patch.corner_radius.is_some() {
                    *corner_radius = patch.corner_radius;
                }
            }
            ElementKind::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                merge(cx, &patch.cx);
                merge(cy, &patch.cy);
                merge(radius, &patch.radius);
                merge(fill, &patch.fill);
            }
            ElementKind::Image {
                x,
                y,
                width,
                height,
                src,
                corner_radius,
            } => {
                merge(x, &patch.x);
                merge(y, &patch.y);
                merge(width, &patch.width);
                merge(height, &patch.height);
                merge(src, &patch.src);
                if patch.corner_radius.is_some() {
                    *corner_radius = patch.corner_radius;
                }
            }
            ElementKind::Arrow {
                x,
                y,
                points,
                stroke,
                stroke_width,
            } => {
                merge(x, &patch.x);
                merge(y, &patch.y);
                merge(points, &patch.points);
                merge(stroke, &patch.stroke);
                merge(stroke_width, &patch.stroke_width);
            }
            ElementKind::Text {
                x,
                y,
                text,
                font_size,
                fill,
            } => {
                merge(x, &patch.x);
                merge(y, &patch.y);
                merge(text, &patch.text);
                merge(font_size, &patch.font_size);
                merge(fill, &patch.fill);
            }
            ElementKind::Ring {
                cx,
                cy,
                inner_radius,
                outer_radius,
                fill,
            } => {
                merge(cx, &patch.cx);
                merge(cy, &patch.cy);
                merge(inner_radius, &patch.inner_radius);
                merge(outer_radius, &patch.outer_radius);
                merge(fill, &patch.fill);
            }
        }
    }
}

fn merge<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *slot = v.clone();
    }
}

// ─── Patches & drafts ────────────────────────────────────────────────────

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        *self == ElementPatch::default()
    }
}

/// A partially specified element, as received from an add payload.
///
/// Any `id` in the payload is ignored: the engine always assigns a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDraft {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementType>,
    #[serde(flatten)]
    pub fields: ElementPatch,
}

fn required<T>(value: Option<T>, ty: ElementType, field: &str) -> Result<T, SceneError> {
    value.ok_or_else(|| SceneError::invalid(format!("{} requires `{field}`", ty.as_str())))
}

impl ElementDraft {
    pub fn new(kind: ElementType, fields: ElementPatch) -> Self {
        Self {
            kind: Some(kind),
            fields,
        }
    }

    /// Parse a draft from JSON. Shape errors are reported as `InvalidElement`.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::invalid(e.to_string()))
    }

    /// Resolve the draft into a complete element with the given id.
    /// Rotation defaults to 0 and the name to the type's default name.
    pub fn into_element(self, id: ElementId) -> Result<Element, SceneError> {
        let ty = self
            .kind
            .ok_or_else(|| SceneError::invalid("missing `type`"))?;
        let f = self.fields;

        let kind = match ty {
            ElementType::Rect => ElementKind::Rect {
                x: required(f.x, ty, "x")?,
                y: required(f.y, ty, "y")?,
                width: required(f.width, ty, "width")?,
                height: required(f.height, ty, "height")?,
                fill: required(f.fill, ty, "fill")?,
                corner_radius: f.corner_radius,
            },
            ElementType::Circle => ElementKind::Circle {
                cx: required(f.cx, ty, "cx")?,
                cy: required(f.cy, ty, "cy")?,
                radius: required(f.radius, ty, "radius")?,
                fill: required(f.fill, ty, "fill")?,
            },
            ElementType::Image => ElementKind::Image {
                x: required(f.x, ty, "x")?,
                y: required(f.y, ty, "y")?,
                width: required(f.width, ty, "width")?,
                height: required(f.height, ty, "height")?,
                src: required(f.src, ty, "src")?,
                corner_radius: f.corner_radius,
            },
            ElementType::Arrow => ElementKind::Arrow {
                x: required(f.x, ty, "x")?,
                y: required(f.y, ty, "y")?,
                points: required(f.points, ty, "points")?,
                stroke: required(f.stroke, ty, "stroke")?,
                stroke_width: required(f.stroke_width, ty, "strokeWidth")?,
            },
            ElementType::Text => ElementKind::Text {
                x: required(f.x, ty, "x")?,
                y: required(f.y, ty, "y")?,
                text: required(f.text, ty, "text")?,
                font_size: required(f.font_size, ty, "fontSize")?,
                fill: required(f.fill, ty, "fill")?,
            },
            ElementType::Ring => ElementKind::Ring {
                cx: required(f.cx, ty, "cx")?,
                cy: required(f.cy, ty, "cy")?,
                inner_radius: required(f.inner_radius, ty, "innerRadius")?,
                outer_radius: required(f.outer_radius, ty, "outerRadius")?,
                fill: required(f.fill, ty, "fill")?,
            },
        };
        kind.validate()?;

        let rotation = f.rotation.unwrap_or(0.0);
        if !rotation.is_finite() {
            return Err(SceneError::invalid("`rotation` is not a finite number"));
        }

        Ok(Element {
            id,
            rotation,
            name: Some(f.name.unwrap_or_else(|| ty.default_name().to_string())),
            kind,
        })
    }
}

impl From<&Element> for ElementDraft {
    /// Draft that reproduces `element` (minus its id) when added.
    fn from(element: &Element) -> Self {
        let mut fields = ElementPatch {
            rotation: Some(element.rotation),
            name: element.name.clone(),
            ..Default::default()
        };
        match &element.kind {
            ElementKind::Rect {
                x,
                y,
                width,
                height,
                fill,
                corner_radius,
            } => {
                fields.x = Some(*x);
                fields.y = Some(*y);
                fields.width = Some(*width);
                fields.height = Some(*height);
                fields.fill = Some(fill.clone());
                fields.corner_radius = *corner_radius;
            }
            ElementKind::Circle {
                cx,
                cy,
                radius,
                fill,
            } => {
                fields.cx = Some(*cx);
                fields.cy = Some(*cy);
                fields.radius = Some(*radius);
                fields.fill = Some(fill.clone());
            }
            ElementKind::Image {
                x,
                y,
                width,
                height,
                src,
                corner_radius,
            } => {
                fields.x = Some(*x);
                fields.y = Some(*y);
                fields.width = Some(*width);
                fields.height = Some(*height);
                fields.src = Some(src.clone());
                fields.corner_radius = *corner_radius;
            }
            ElementKind::Arrow {
                x,
                y,
                points,
                stroke,
                stroke_width,
            } => {
                fields.x = Some(*x);
                fields.y = Some(*y);
                fields.points = Some(*points);
                fields.stroke = Some(stroke.clone());
                fields.stroke_width = Some(*stroke_width);
            }
            ElementKind::Text {
                x,
                y,
                text,
                font_size,
                fill,
            } => {
                fields.x = Some(*x);
                fields.y = Some(*y);
                fields.text = Some(text.clone());
                fields.font_size = Some(*font_size);
                fields.fill = Some(fill.clone());
            }
            ElementKind::Ring {
                cx,
                cy,
                inner_radius,
                outer_radius,
                fill,
            } => {
                fields.cx = Some(*cx);
                fields.cy = Some(*cy);
                fields.inner_radius = Some(*inner_radius);
                fields.outer_radius = Some(*outer_radius);
                fields.fill = Some(fill.clone());
            }
        }
        ElementDraft::new(element.element_type(), fields)
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// Point-in-time copy of the element list and selection.
///
/// Invariant: `selected_id`, when set, names an element in `elements`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub selected_id: Option<ElementId>,
}

impl Scene {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            selected_id: None,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected_id.and_then(|id| self.get(id))
    }

    /// `(array_index, element)` pairs, topmost first.
    pub fn top_first(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.elements.iter().enumerate().rev()
    }

    /// Drop a selection that no longer names an element.
    pub fn repair_selection(&mut self) {
        if let Some(id) = self.selected_id
            && !self.contains(id)
        {
            self.selected_id = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(id: &str) -> Element {
        Element::new(
            ElementId::intern(id),
            ElementKind::Rect {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 50.0,
                fill: "#87CEEB".into(),
                corner_radius: Some(8.0),
            },
        )
    }

    #[test]
    fn element_json_shape_is_flat_and_camel_case() {
        let el = rect("r1");
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "r1",
                "type": "rect",
                "rotation": 0.0,
                "name": "Rectangle",
                "x": 10.0,
                "y": 20.0,
                "width": 100.0,
                "height": 50.0,
                "fill": "#87CEEB",
                "cornerRadius": 8.0,
            })
        );
    }

    #[test]
    fn parses_persisted_arrow() {
        let json = r##"{
            "id": "fVtOVWXcHv9OZQWh_0h2t",
            "type": "arrow",
            "x": 474.9,
            "y": 228.3,
            "points": [0, 0, 249.17, 0],
            "stroke": "#090b10",
            "strokeWidth": 4,
            "rotation": 40.7,
            "name": "Arrow"
        }"##;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.element_type(), ElementType::Arrow);
        match el.kind {
            ElementKind::Arrow {
                points,
                stroke_width,
                ..
            } => {
                assert_eq!(points, [0.0, 0.0, 249.17, 0.0]);
                assert_eq!(stroke_width, 4.0);
            }
            _ => panic!("expected Arrow"),
        }
    }

    #[test]
    fn rotation_defaults_to_zero_when_absent() {
        let json = r##"{"id":"c","type":"circle","cx":1,"cy":2,"radius":3,"fill":"#fff"}"##;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.rotation, 0.0);
        assert_eq!(el.name, None);
        assert_eq!(el.display_name(), "Circle");
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut el = rect("r2");
        el.apply_patch(&ElementPatch {
            fill: Some("#ff0000".into()),
            width: Some(300.0),
            radius: Some(99.0),
            ..Default::default()
        });
        match &el.kind {
            ElementKind::Rect {
                x, width, fill, ..
            } => {
                assert_eq!(*x, 10.0);
                assert_eq!(*width, 300.0);
                assert_eq!(fill, "#ff0000");
            }
            _ => panic!("expected Rect"),
        }
        assert_eq!(el.id, ElementId::intern("r2"));
    }

    #[test]
    fn draft_without_type_is_invalid() {
        let draft = ElementDraft::from_json(r#"{"x": 1, "y": 2}"#).unwrap();
        let err = draft.into_element(ElementId::generate()).unwrap_err();
        assert_eq!(err, SceneError::InvalidElement("missing `type`".into()));
    }

    #[test]
    fn draft_missing_required_field_is_invalid() {
        let draft =
            ElementDraft::from_json(r##"{"type":"circle","cx":1,"cy":2,"fill":"#000"}"##).unwrap();
        let err = draft.into_element(ElementId::generate()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidElement(msg) if msg.contains("radius")));
    }

    #[test]
    fn draft_with_short_points_is_invalid() {
        let err = ElementDraft::from_json(r#"{"type":"arrow","points":[0,0,1]}"#).unwrap_err();
        assert!(matches!(err, SceneError::InvalidElement(_)));
    }

    #[test]
    fn ring_with_inverted_radii_is_invalid() {
        let draft = ElementDraft::new(
            ElementType::Ring,
            ElementPatch {
                cx: Some(0.0),
                cy: Some(0.0),
                inner_radius: Some(40.0),
                outer_radius: Some(20.0),
                fill: Some("#fff".into()),
                ..Default::default()
            },
        );
        assert!(draft.into_element(ElementId::generate()).is_err());
    }

    #[test]
    fn negative_size_is_invalid() {
        let draft = ElementDraft::new(
            ElementType::Rect,
            ElementPatch {
                x: Some(0.0),
                y: Some(0.0),
                width: Some(-1.0),
                height: Some(10.0),
                fill: Some("#fff".into()),
                ..Default::default()
            },
        );
        assert!(draft.into_element(ElementId::generate()).is_err());
    }

    #[test]
    fn draft_fills_rotation_and_default_name() {
        let draft = ElementDraft::from_json(
            r##"{"type":"text","x":1,"y":2,"text":"hi","fontSize":18,"fill":"#111827"}"##,
        )
        .unwrap();
        let el = draft.into_element(ElementId::intern("t1")).unwrap();
        assert_eq!(el.rotation, 0.0);
        assert_eq!(el.name.as_deref(), Some("Text"));
    }

    #[test]
    fn draft_from_element_reproduces_it() {
        let original = rect("r3");
        let copy = ElementDraft::from(&original)
            .into_element(ElementId::intern("r3"))
            .unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn position_follows_anchor() {
        let mut ring = Element::new(
            ElementId::intern("ring"),
            ElementKind::Ring {
                cx: 5.0,
                cy: 6.0,
                inner_radius: 1.0,
                outer_radius: 2.0,
                fill: "#000".into(),
            },
        );
        assert_eq!(ring.position(), Point::new(5.0, 6.0));
        ring.set_position(Point::new(7.0, 8.0));
        assert_eq!(
            ring.position_patch(Point::new(1.0, 2.0)),
            ElementPatch {
                cx: Some(1.0),
                cy: Some(2.0),
                ..Default::default()
            }
        );
        assert_eq!(ring.position(), Point::new(7.0, 8.0));
    }

    #[test]
    fn scene_selection_repair() {
        let mut scene = Scene::new(vec![rect("a")]);
        scene.selected_id = Some(ElementId::intern("gone"));
        scene.repair_selection();
        assert_eq!(scene.selected_id, None);
    }

    #[test]
    fn top_first_reverses_order() {
        let scene = Scene::new(vec![rect("bottom"), rect("top")]);
        let order: Vec<usize> = scene.top_first().map(|(i, _)| i).collect();
        assert_eq!(order, vec![1, 0]);
    }
}
