//! Per-type default and minimum-size tables.
//!
//! Defaults seed the centered adders; minimums bound resize normalization.

use kurbo::Size;

pub struct RectDefaults {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub fill: &'static str,
}

pub const RECT_DEFAULTS: RectDefaults = RectDefaults {
    width: 320.0,
    height: 200.0,
    corner_radius: 0.0,
    fill: "#cccccc",
};
pub const RECT_MIN: Size = Size::new(24.0, 24.0);

pub const IMAGE_MIN: Size = Size::new(24.0, 24.0);

pub struct CircleDefaults {
    pub radius: f64,
    pub fill: &'static str,
}

pub const CIRCLE_DEFAULTS: CircleDefaults = CircleDefaults {
    radius: 40.0,
    fill: "#cccccc",
};
pub const CIRCLE_MIN_RADIUS: f64 = 12.0;

pub struct RingDefaults {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: &'static str,
}

pub const RING_DEFAULTS: RingDefaults = RingDefaults {
    inner_radius: 20.0,
    outer_radius: 40.0,
    fill: "#cccccc",
};
pub const RING_MIN_INNER: f64 = 6.0;
pub const RING_MIN_OUTER: f64 = 12.0;

pub struct TextDefaults {
    pub text: &'static str,
    pub font_size: f64,
    pub fill: &'static str,
}

pub const TEXT_DEFAULTS: TextDefaults = TextDefaults {
    text: "Edit from element inspector",
    font_size: 18.0,
    fill: "#111827",
};
pub const TEXT_MIN_FONT_SIZE: f64 = 8.0;
pub const TEXT_MIN_BOX: Size = Size::new(24.0, 16.0);
/// Horizontal offset of a new text box from the stage center.
pub const TEXT_CENTER_OFFSET: f64 = 60.0;

pub struct ArrowDefaults {
    pub points: [f64; 4],
    pub stroke: &'static str,
    pub stroke_width: f64,
}

pub const ARROW_DEFAULTS: ArrowDefaults = ArrowDefaults {
    points: [0.0, 0.0, 120.0, 0.0],
    stroke: "#111827",
    stroke_width: 2.0,
};
pub const ARROW_MIN_BBOX: Size = Size::new(24.0, 24.0);

/// Box assumed for Text/Arrow before the rendering surface has measured them.
pub const UNMEASURED_BOX: Size = Size::new(120.0, 24.0);

/// Inspector limits for the rounded-corner control.
pub const CORNER_RADIUS_MAX: f64 = 64.0;
pub const CORNER_RADIUS_ROUNDED_MIN: f64 = 8.0;
pub const CORNER_RADIUS_ROUNDED_DEFAULT: f64 = 12.0;
