//! Shift-drag box movement.
//!
//! A drag remembers where inside the box the pointer grabbed it, in screen
//! pixels. Each move places the box so that grab point stays under the
//! pointer, then converts back to canvas units at the current display scale.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::config::BoundsPolicy;
use crate::doc::{BoxId, CanvasBox};
use crate::space::{Point, Rect, Size, to_canvas, to_screen};

/// An in-progress box drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub id: BoxId,
    /// Pointer position minus the box's screen top-left at pointer-down.
    pub offset: Point,
}

impl DragGesture {
    /// Start dragging `b` from `pointer`, given the canvas container's screen
    /// rect and the display scale.
    #[must_use]
    pub fn begin(b: &CanvasBox, pointer: Point, origin: &Rect, scale: f64) -> Self {
        let box_top_left = origin.top_left() + to_screen(Point::new(b.x, b.y), scale);
        Self { id: b.id, offset: pointer - box_top_left }
    }

    /// New canvas top-left for the box, or `None` when the container rect is
    /// unavailable this frame.
    #[must_use]
    pub fn update(
        &self,
        pointer: Point,
        origin: Option<&Rect>,
        scale: f64,
        box_size: Size,
        canvas: Size,
        policy: BoundsPolicy,
    ) -> Option<Point> {
        let origin = origin?;
        let pos = to_canvas(pointer - self.offset, origin, scale);
        Some(match policy {
            BoundsPolicy::Unconstrained => pos,
            BoundsPolicy::Constrained => Point::new(
                clamp_low_wins(pos.x, canvas.width - box_size.width),
                clamp_low_wins(pos.y, canvas.height - box_size.height),
            ),
        })
    }
}

/// Clamp `v` into `[0, hi]`; when `hi < 0` the result is 0.
fn clamp_low_wins(v: f64, hi: f64) -> f64 {
    v.min(hi).max(0.0)
}
