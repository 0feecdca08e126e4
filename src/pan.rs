//! Per-box image pan and scale.
//!
//! Each image box can have its content shifted and scaled inside its frame.
//! The state is indexed by the box's position in the store. The engine grows
//! it with every added box; any index that was never touched reads as the
//! identity `{0, 0, 1}`.

#[cfg(test)]
#[path = "pan_test.rs"]
mod pan_test;

use serde::{Deserialize, Serialize};

use crate::consts::{IMAGE_PAN_LIMIT_PX, IMAGE_SCALE_MAX, IMAGE_SCALE_MIN};
use crate::doc::BoxId;
use crate::space::Point;

/// Offset (screen pixels) and scale applied to one box's image content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePan {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ImagePan {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Image pan state for every box, indexed like the box store.
#[derive(Debug, Clone, Default)]
pub struct ImagePanStore {
    pans: Vec<ImagePan>,
}

impl ImagePanStore {
    #[must_use]
    pub fn new() -> Self {
        Self { pans: Vec::new() }
    }

    /// Pan state at `index`, identity when never set.
    #[must_use]
    pub fn get(&self, index: usize) -> ImagePan {
        self.pans.get(index).copied().unwrap_or_default()
    }

    /// Grow to at least `len` entries, filling with the identity.
    pub fn ensure_len(&mut self, len: usize) {
        if self.pans.len() < len {
            self.pans.resize(len, ImagePan::default());
        }
    }

    /// Drop the entry for a removed box so later indices stay aligned.
    pub fn remove(&mut self, index: usize) {
        if index < self.pans.len() {
            self.pans.remove(index);
        }
    }

    /// Add a screen-pixel delta to the offset. Drag panning is not clamped;
    /// only the slider setters are.
    pub fn pan_by(&mut self, index: usize, delta: Point) -> ImagePan {
        let pan = self.entry(index);
        pan.x += delta.x;
        pan.y += delta.y;
        *pan
    }

    /// Zero the offset, keeping the scale.
    pub fn reset_position(&mut self, index: usize) -> ImagePan {
        let pan = self.entry(index);
        pan.x = 0.0;
        pan.y = 0.0;
        *pan
    }

    pub fn set_offset(&mut self, index: usize, axis: Axis, value: f64) -> ImagePan {
        let value = value.clamp(-IMAGE_PAN_LIMIT_PX, IMAGE_PAN_LIMIT_PX);
        let pan = self.entry(index);
        match axis {
            Axis::X => pan.x = value,
            Axis::Y => pan.y = value,
        }
        *pan
    }

    pub fn set_scale(&mut self, index: usize, value: f64) -> ImagePan {
        let pan = self.entry(index);
        pan.scale = value.clamp(IMAGE_SCALE_MIN, IMAGE_SCALE_MAX);
        *pan
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pans.is_empty()
    }

    fn entry(&mut self, index: usize) -> &mut ImagePan {
        self.ensure_len(index + 1);
        &mut self.pans[index]
    }
}

/// An in-progress image pan drag. The target is held by id; its store
/// index can shift while the gesture runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PanGesture {
    pub id: BoxId,
    /// Pointer position at the previous event.
    pub last: Point,
}

impl PanGesture {
    #[must_use]
    pub fn begin(id: BoxId, pointer: Point) -> Self {
        Self { id, last: pointer }
    }

    /// Screen delta since the previous event; advances `last`.
    pub fn advance(&mut self, pointer: Point) -> Point {
        let delta = pointer - self.last;
        self.last = pointer;
        delta
    }
}
