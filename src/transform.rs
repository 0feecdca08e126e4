//! CSS transform composition for box content.
//!
//! Every box shares the session's 3D rotation and perspective and carries its
//! own image scale. Only the selected box is translated by its pan offset.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_PERSPECTIVE_PX, PERSPECTIVE_MAX_PX, PERSPECTIVE_MIN_PX, ROTATION_LIMIT_DEG, TRANSFORM_TRANSITION_SECS,
};
use crate::pan::ImagePanStore;

/// Session-wide 3D rotation (degrees) and perspective (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform3D {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub perspective: f64,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self { rotate_x: 0.0, rotate_y: 0.0, rotate_z: 0.0, perspective: DEFAULT_PERSPECTIVE_PX }
    }
}

impl Transform3D {
    /// Copy with every field clamped into its slider range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            rotate_x: self.rotate_x.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG),
            rotate_y: self.rotate_y.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG),
            rotate_z: self.rotate_z.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG),
            perspective: self.perspective.clamp(PERSPECTIVE_MIN_PX, PERSPECTIVE_MAX_PX),
        }
    }
}

/// What the compositor needs to know about the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_index: Option<usize>,
    /// A drag, resize or pan gesture is in progress.
    pub gesture_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransitionPolicy {
    None,
    Ease { secs: f64 },
}

impl TransitionPolicy {
    #[must_use]
    pub fn css(&self) -> String {
        match self {
            Self::None => "none".into(),
            Self::Ease { secs } => format!("transform {secs}s ease"),
        }
    }
}

/// A fully resolved transform for one box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformDescriptor {
    pub perspective: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub transition: TransitionPolicy,
}

impl TransformDescriptor {
    /// CSS `transform` value. Order matters and is fixed.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) rotateZ({}deg) scale({}) translate({}px, {}px)",
            self.perspective,
            self.rotate_x,
            self.rotate_y,
            self.rotate_z,
            self.scale,
            self.translate_x,
            self.translate_y,
        )
    }
}

/// Resolve the transform for the box at `index`.
#[must_use]
pub fn compose_transform(
    index: usize,
    selection: &SelectionState,
    transform: &Transform3D,
    pans: &ImagePanStore,
) -> TransformDescriptor {
    let selected = selection.selected_index == Some(index);
    let pan = pans.get(index);
    let (translate_x, translate_y) = if selected { (pan.x, pan.y) } else { (0.0, 0.0) };
    let transition = if selected && selection.gesture_active {
        TransitionPolicy::None
    } else {
        TransitionPolicy::Ease { secs: TRANSFORM_TRANSITION_SECS }
    };

    TransformDescriptor {
        perspective: transform.perspective,
        rotate_x: transform.rotate_x,
        rotate_y: transform.rotate_y,
        rotate_z: transform.rotate_z,
        scale: pan.scale,
        translate_x,
        translate_y,
        transition,
    }
}
