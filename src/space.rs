//! Canvas space: points, rectangles, and screen/canvas conversions.
//!
//! Screen coordinates are CSS pixels as reported by pointer events. Canvas
//! coordinates are units of the full-resolution artwork. The two are related by
//! the display scale and the screen position of the canvas container's top-left
//! corner, which the host passes in explicitly with every event.

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle given by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }
}

/// Convert a screen point to canvas coordinates.
///
/// `origin` is the screen-space bounding rectangle of the canvas container;
/// only its top-left corner is used. `scale` must be positive.
#[must_use]
pub fn to_canvas(screen: Point, origin: &Rect, scale: f64) -> Point {
    Point {
        x: (screen.x - origin.x) / scale,
        y: (screen.y - origin.y) / scale,
    }
}

/// Convert a canvas point to its screen offset from the canvas origin.
#[must_use]
pub fn to_screen(canvas: Point, scale: f64) -> Point {
    Point {
        x: canvas.x * scale,
        y: canvas.y * scale,
    }
}

/// Convert a screen-space delta (pixels) to a canvas-space delta.
#[must_use]
pub fn screen_delta_to_canvas(delta: Point, scale: f64) -> Point {
    Point {
        x: delta.x / scale,
        y: delta.y / scale,
    }
}

/// Scale a canvas-space rectangle into screen-space size and offset.
#[must_use]
pub fn scale_rect(rect: Rect, scale: f64) -> Rect {
    Rect {
        x: rect.x * scale,
        y: rect.y * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}
