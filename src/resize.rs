//! Handle-drag box resizing.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::config::BoundsPolicy;
use crate::consts::MIN_BOX_SIZE;
use crate::doc::{BoxId, CanvasBox};
use crate::hit::ResizeAnchor;
use crate::space::{Point, Rect, Size, screen_delta_to_canvas};

/// An in-progress resize from one of the selected box's handles.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub id: BoxId,
    pub anchor: ResizeAnchor,
    /// Screen position of the pointer at pointer-down.
    pub start: Point,
    /// Box geometry at pointer-down, in canvas units.
    pub initial: Rect,
}

impl ResizeGesture {
    #[must_use]
    pub fn begin(b: &CanvasBox, anchor: ResizeAnchor, start: Point) -> Self {
        Self { id: b.id, anchor, start, initial: b.rect() }
    }

    /// Box geometry for the current pointer position.
    ///
    /// The edge opposite the anchor stays fixed. Both dimensions are floored
    /// at [`MIN_BOX_SIZE`]; under [`BoundsPolicy::Constrained`] the moving edge
    /// is also capped at the canvas boundary, the floor taking precedence.
    #[must_use]
    pub fn update(&self, pointer: Point, scale: f64, canvas: Size, policy: BoundsPolicy) -> Rect {
        let delta = screen_delta_to_canvas(pointer - self.start, scale);
        let constrained = policy == BoundsPolicy::Constrained;
        let r = self.initial;

        let (x, width) = resize_axis(r.x, r.width, delta.x, self.anchor.x_sign(), canvas.width, constrained);
        let (y, height) = resize_axis(r.y, r.height, delta.y, self.anchor.y_sign(), canvas.height, constrained);
        Rect { x, y, width, height }
    }
}

/// Resize one axis. `sign` selects the moving edge: `1` far, `-1` near, `0` none.
fn resize_axis(start: f64, extent: f64, delta: f64, sign: f64, limit: f64, constrained: bool) -> (f64, f64) {
    if sign > 0.0 {
        let mut far = start + extent + delta;
        if constrained {
            far = far.min(limit);
        }
        (start, (far - start).max(MIN_BOX_SIZE))
    } else if sign < 0.0 {
        let far = start + extent;
        let mut near = start + delta;
        if constrained {
            near = near.max(0.0);
        }
        let size = (far - near).max(MIN_BOX_SIZE);
        (far - size, size)
    } else {
        (start, extent)
    }
}
