//! The stage: the bounded drawing surface every element must stay inside.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::geom;

/// Fixed stage height used when the host does not report one.
pub const STAGE_HEIGHT: f64 = 620.0;

/// Stage dimensions at 1:1 scale. Width follows the host container,
/// height is fixed for the lifetime of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: STAGE_HEIGHT,
        }
    }
}

impl Stage {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Rounded stage center, the anchor for every centered adder.
    pub fn center(&self) -> Point {
        geom::stage_center(self.size())
    }

    /// Adopt a newly reported container width. Negative or non-finite
    /// widths (hidden container, first layout pass) collapse to zero.
    pub fn set_width(&mut self, width: f64) {
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }
}
