//! Numeric helpers shared by the engine and the bounds policy.
//!
//! All stage coordinates are `f64` at 1:1 scale with the rendering surface.

use kurbo::{Point, Size};

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `min > max` (stage smaller
/// than the element) the floor wins and `min` is returned.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Round half up (`2.5 → 3`, `-2.5 → -2`), the convention used for every
/// size and placement computed by the editor.
pub fn round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Center of a stage of the given size, rounded to whole units.
pub fn stage_center(size: Size) -> Point {
    Point::new(round(size.width / 2.0), round(size.height / 2.0))
}

/// Axis-aligned extent of the segment `(x1, y1) → (x2, y2)`.
pub fn arrow_bbox_from_points(x1: f64, y1: f64, x2: f64, y2: f64) -> Size {
    Size::new((x2 - x1).abs(), (y2 - y1).abs())
}

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    Point::new(x1, y1).distance(Point::new(x2, y2))
}

/// Clamp a box-anchored (top-left) position so a box of `size` stays on a
/// stage of `stage` size.
pub fn clamp_box(pos: Point, size: Size, stage: Size) -> Point {
    Point::new(
        clamp(pos.x, 0.0, (stage.width - size.width).max(0.0)),
        clamp(pos.y, 0.0, (stage.height - size.height).max(0.0)),
    )
}

/// Clamp a center-anchored position so a disc of radius `r` stays on stage.
pub fn clamp_disc(center: Point, r: f64, stage: Size) -> Point {
    Point::new(
        clamp(center.x, r, r.max(stage.width - r)),
        clamp(center.y, r, r.max(stage.height - r)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(30.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn clamp_inverted_range_returns_floor() {
        assert_eq!(clamp(5.0, 50.0, 10.0), 50.0);
    }

    #[test]
    fn round_is_half_up() {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(2.49), 2.0);
        assert_eq!(round(-2.5), -2.0);
    }

    #[test]
    fn arrow_bbox_is_absolute() {
        let size = arrow_bbox_from_points(10.0, 10.0, -20.0, 50.0);
        assert_eq!(size, Size::new(30.0, 40.0));
    }

    #[test]
    fn distance_345() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn center_of_stage() {
        assert_eq!(stage_center(Size::new(801.0, 620.0)), Point::new(401.0, 310.0));
    }

    #[test]
    fn clamp_box_pins_to_far_edge() {
        let p = clamp_box(
            Point::new(1000.0, -5.0),
            Size::new(100.0, 50.0),
            Size::new(500.0, 620.0),
        );
        assert_eq!(p, Point::new(400.0, 0.0));
    }

    #[test]
    fn clamp_disc_respects_radius() {
        let p = clamp_disc(Point::new(10.0, -20.0), 50.0, Size::new(500.0, 600.0));
        assert_eq!(p, Point::new(50.0, 50.0));
    }

    #[test]
    fn clamp_disc_on_tiny_stage_centers_on_radius() {
        let p = clamp_disc(Point::new(0.0, 0.0), 50.0, Size::new(40.0, 40.0));
        assert_eq!(p, Point::new(50.0, 50.0));
    }
}
