//! Keep the viewport focused on the same part of the canvas across a zoom.
//!
//! The canvas sits inside a scrollable container with symmetric padding, so
//! the scroll content is `2 * canvas.x + canvas.width` wide (likewise for
//! height). Before the scale changes we record which fraction of the canvas is
//! under the viewport center; after each layout we scroll so that fraction is
//! centered again.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use serde::{Deserialize, Serialize};

use crate::space::Rect;

/// Scroll container measurements reported by the host after layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollViewport {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub client_width: f64,
    pub client_height: f64,
    /// Canvas rectangle in scroll-content coordinates.
    pub canvas: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub left: f64,
    pub top: f64,
}

/// Fractional canvas position that should stay under the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusAnchor {
    pub fx: f64,
    pub fy: f64,
}

impl FocusAnchor {
    #[must_use]
    pub fn capture(vp: &ScrollViewport) -> Self {
        Self {
            fx: fraction(vp.scroll_left + vp.client_width * 0.5, vp.canvas.x, vp.canvas.width),
            fy: fraction(vp.scroll_top + vp.client_height * 0.5, vp.canvas.y, vp.canvas.height),
        }
    }

    /// Scroll position that re-centers the anchored fraction in `vp`.
    ///
    /// An axis on which the canvas fits inside the viewport scrolls to 0.
    #[must_use]
    pub fn recenter(&self, vp: &ScrollViewport) -> ScrollPosition {
        ScrollPosition {
            left: center_axis(self.fx, vp.canvas.x, vp.canvas.width, vp.client_width),
            top: center_axis(self.fy, vp.canvas.y, vp.canvas.height, vp.client_height),
        }
    }
}

fn fraction(center: f64, origin: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.5;
    }
    (center - origin) / extent
}

fn center_axis(f: f64, origin: f64, extent: f64, client: f64) -> f64 {
    let content = 2.0 * origin + extent;
    if content <= client {
        return 0.0;
    }
    let want = origin + f * extent - client * 0.5;
    want.clamp(0.0, content - client)
}
