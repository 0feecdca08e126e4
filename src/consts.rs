//! Shared numeric constants for the editor engine.

// ── Geometry ────────────────────────────────────────────────────

/// Minimum box width and height in canvas units.
pub const MIN_BOX_SIZE: f64 = 50.0;

/// Default canvas width in true pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 2560.0;

/// Default canvas height in true pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1440.0;

/// Size of a freshly added text box, in canvas units.
pub const TEXT_BOX_WIDTH: f64 = 200.0;
pub const TEXT_BOX_HEIGHT: f64 = 100.0;

/// Fraction of the canvas a newly added image may occupy on each axis.
pub const IMAGE_MAX_CANVAS_FRACTION: f64 = 0.7;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower bound of the default display-scale interval.
pub const ZOOM_MIN: f64 = 0.1;

/// Upper bound of the default display-scale interval.
pub const ZOOM_MAX: f64 = 3.0;

/// Display scale a session starts at.
pub const DEFAULT_DISPLAY_SCALE: f64 = 0.3;

/// Increment for discrete zoom-in / zoom-out actions.
pub const ZOOM_STEP: f64 = 0.1;

/// Wheel zoom increment per 100 px of wheel delta.
pub const WHEEL_ZOOM_STEP: f64 = 0.05;

/// Duration of the eased zoom transition in milliseconds.
pub const ZOOM_ANIMATION_MS: f64 = 200.0;

/// Zoom preset levels offered by the zoom menu.
pub const ZOOM_PRESETS: [f64; 6] = [0.5, 0.75, 1.0, 1.5, 2.0, 2.5];

/// Zoom targets are rounded to `1 / ZOOM_RESOLUTION` so repeated steps stay decimal.
pub const ZOOM_RESOLUTION: f64 = 1_000_000.0;

// ── Transforms ──────────────────────────────────────────────────

/// Eased transition length applied to box transforms outside a gesture.
pub const TRANSFORM_TRANSITION_SECS: f64 = 0.3;

/// Default perspective distance in pixels.
pub const DEFAULT_PERSPECTIVE_PX: f64 = 1000.0;

pub const PERSPECTIVE_MIN_PX: f64 = 100.0;
pub const PERSPECTIVE_MAX_PX: f64 = 2000.0;

/// Rotation sliders are limited to ±180°.
pub const ROTATION_LIMIT_DEG: f64 = 180.0;

/// Image pan offsets are limited to ±200 screen pixels.
pub const IMAGE_PAN_LIMIT_PX: f64 = 200.0;

pub const IMAGE_SCALE_MIN: f64 = 0.1;
pub const IMAGE_SCALE_MAX: f64 = 2.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;
