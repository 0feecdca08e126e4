//! Animated display-scale controller.
//!
//! The controller owns two values: the `target` the user asked for and the
//! `current` scale being displayed. Discrete steps move the target; frame
//! ticks ease the displayed value toward it with a cubic ease-out and snap to
//! it exactly when the animation completes.
//!
//! The controller never touches a clock. The host calls [`ZoomController::tick`]
//! from its frame callback and schedules callbacks according to the returned
//! [`FrameRequest`].

#[cfg(test)]
#[path = "zoom_test.rs"]
mod zoom_test;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{WHEEL_ZOOM_STEP, ZOOM_ANIMATION_MS, ZOOM_MAX, ZOOM_MIN, ZOOM_RESOLUTION, ZOOM_STEP};

/// Closed interval of allowed display scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f64,
    max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: ZOOM_MIN, max: ZOOM_MAX }
    }
}

impl ZoomRange {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidZoomRange`] when `min <= 0`, `min > max`,
    /// or either bound is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidZoomRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// What the host should do with its animation-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Nothing to schedule.
    None,
    /// Request a frame.
    Schedule,
    /// Cancel the pending frame, then request a new one.
    Reschedule,
}

/// Cubic ease-out over `p` in `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(p: f64) -> f64 {
    1.0 - (1.0 - p).powi(3)
}

fn quantize(v: f64) -> f64 {
    (v * ZOOM_RESOLUTION).round() / ZOOM_RESOLUTION
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Animation {
    from: f64,
    to: f64,
    /// Timestamp of the first tick; `None` until the first frame arrives.
    start_ms: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    range: ZoomRange,
    current: f64,
    target: f64,
    animation: Option<Animation>,
}

impl ZoomController {
    /// Controller resting at `initial`, clamped into `range`.
    #[must_use]
    pub fn new(range: ZoomRange, initial: f64) -> Self {
        let v = range.clamp(initial);
        Self { range, current: v, target: v, animation: None }
    }

    /// Displayed scale.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Scale the controller is heading toward.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[must_use]
    pub fn range(&self) -> ZoomRange {
        self.range
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Step the target by [`ZOOM_STEP`].
    pub fn zoom_by(&mut self, direction: ZoomDirection) -> FrameRequest {
        self.animate_to(self.target + direction.sign() * ZOOM_STEP)
    }

    /// Step the target by a wheel delta. Negative `delta_y` zooms in.
    pub fn zoom_wheel(&mut self, delta_y: f64) -> FrameRequest {
        if !delta_y.is_finite() || delta_y.abs() < f64::EPSILON {
            return FrameRequest::None;
        }
        let direction = if delta_y < 0.0 { ZoomDirection::In } else { ZoomDirection::Out };
        let step = WHEEL_ZOOM_STEP * delta_y.abs() / 100.0;
        self.animate_to(self.target + direction.sign() * step)
    }

    /// Animate toward `value`.
    pub fn set_zoom(&mut self, value: f64) -> FrameRequest {
        self.animate_to(value)
    }

    /// Jump straight to `value`, cancelling any animation. Returns true when an
    /// animation was running, so the host's pending frame must be cancelled.
    pub fn set_immediate(&mut self, value: f64) -> bool {
        let v = self.range.clamp(value);
        self.current = v;
        self.target = v;
        self.animation.take().is_some()
    }

    /// Advance the animation to `now_ms`.
    ///
    /// Returns [`FrameRequest::Schedule`] while more frames are needed and
    /// [`FrameRequest::None`] once the displayed value has settled on the target.
    pub fn tick(&mut self, now_ms: f64) -> FrameRequest {
        let Some(anim) = self.animation.as_mut() else {
            return FrameRequest::None;
        };
        let start = *anim.start_ms.get_or_insert(now_ms);
        let progress = ((now_ms - start) / ZOOM_ANIMATION_MS).clamp(0.0, 1.0);

        if progress >= 1.0 {
            self.current = anim.to;
            self.animation = None;
            return FrameRequest::None;
        }
        self.current = anim.from + (anim.to - anim.from) * ease_out_cubic(progress);
        FrameRequest::Schedule
    }

    fn animate_to(&mut self, value: f64) -> FrameRequest {
        let to = self.range.clamp(quantize(value));
        let was_animating = self.animation.is_some();
        self.target = to;

        if !was_animating && (to - self.current).abs() < f64::EPSILON {
            self.current = to;
            return FrameRequest::None;
        }
        self.animation = Some(Animation { from: self.current, to, start_ms: None });
        if was_animating { FrameRequest::Reschedule } else { FrameRequest::Schedule }
    }
}
