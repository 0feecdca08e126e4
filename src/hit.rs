#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{BoxId, BoxStore};
use crate::space::{Point, Rect};

/// Which part of a box was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Every handle, corners first so they win where handles overlap on a
    /// small box.
    pub const ALL: [ResizeAnchor; 8] =
        [Self::Nw, Self::Ne, Self::Sw, Self::Se, Self::N, Self::E, Self::S, Self::W];

    /// Horizontal sign: `1` moves the east edge, `-1` the west edge, `0` neither.
    #[must_use]
    pub fn x_sign(self) -> f64 {
        match self {
            Self::Ne | Self::E | Self::Se => 1.0,
            Self::Nw | Self::W | Self::Sw => -1.0,
            Self::N | Self::S => 0.0,
        }
    }

    /// Vertical sign: `1` moves the south edge, `-1` the north edge, `0` neither.
    #[must_use]
    pub fn y_sign(self) -> f64 {
        match self {
            Self::Sw | Self::S | Self::Se => 1.0,
            Self::Nw | Self::N | Self::Ne => -1.0,
            Self::E | Self::W => 0.0,
        }
    }

    /// Handle position on a rectangle.
    #[must_use]
    pub fn position(self, rect: &Rect) -> Point {
        let fx = (self.x_sign() + 1.0) * 0.5;
        let fy = (self.y_sign() + 1.0) * 0.5;
        Point::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
    }

    /// CSS cursor shown over the handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub box_id: BoxId,
    pub part: HitPart,
}

/// Test which box (if any) is under `canvas_pt`.
///
/// The selected box's handles are checked first, with a slop of
/// [`HANDLE_RADIUS_PX`] screen pixels converted to canvas units at `scale`.
/// Bodies are checked topmost first.
#[must_use]
pub fn hit_test(canvas_pt: Point, boxes: &BoxStore, scale: f64, selected_id: Option<BoxId>) -> Option<Hit> {
    let slop = HANDLE_RADIUS_PX / scale;

    if let Some(sel) = selected_id.and_then(|id| boxes.get(&id)) {
        let rect = sel.rect();
        for anchor in ResizeAnchor::ALL {
            let h = anchor.position(&rect);
            if (canvas_pt.x - h.x).abs() <= slop && (canvas_pt.y - h.y).abs() <= slop {
                return Some(Hit { box_id: sel.id, part: HitPart::ResizeHandle(anchor) });
            }
        }
    }

    boxes
        .sorted_boxes()
        .into_iter()
        .rev()
        .find(|b| b.rect().contains(canvas_pt))
        .map(|b| Hit { box_id: b.id, part: HitPart::Body })
}
