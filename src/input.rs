//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers`, `Button`, `Key` and `WheelDelta` describe a raw host event.
//! `Gesture` is the active pointer interaction tracked between pointer-down and
//! pointer-up. At most one gesture exists at a time; each active variant owns
//! the context needed to turn the next pointer position into a box update.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::BoxId;
use crate::drag::DragGesture;
use crate::pan::PanGesture;
use crate::resize::ResizeGesture;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held. Required to start a box drag.
    #[serde(default)]
    pub shift: bool,
    /// Ctrl key is held. Turns wheel and `+`/`-`/`0` into zoom.
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"+"`, `"0"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    #[serde(default)]
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected box, if any.
    pub selected_id: Option<BoxId>,
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Moving a box with shift held.
    Dragging(DragGesture),
    /// Dragging one of the selected box's resize handles.
    Resizing(ResizeGesture),
    /// Panning the content of a selected original-size image.
    PanningImage(PanGesture),
}

impl Gesture {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The box the gesture operates on.
    #[must_use]
    pub fn box_id(&self) -> Option<BoxId> {
        match self {
            Self::Idle => None,
            Self::Dragging(g) => Some(g.id),
            Self::Resizing(g) => Some(g.id),
            Self::PanningImage(g) => Some(g.id),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging(_) => "drag",
            Self::Resizing(_) => "resize",
            Self::PanningImage(_) => "image-pan",
        }
    }
}
