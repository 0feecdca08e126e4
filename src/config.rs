//! Engine configuration parsed from environment variables.
//!
//! Every setting has a default, so an empty environment yields a working
//! editor. Values that are present but malformed are rejected rather than
//! silently replaced.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashMap;
use std::env::VarError;

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DISPLAY_SCALE};
use crate::zoom::ZoomRange;

pub const ENV_ZOOM_MIN: &str = "EASEL_ZOOM_MIN";
pub const ENV_ZOOM_MAX: &str = "EASEL_ZOOM_MAX";
pub const ENV_BOUNDS_POLICY: &str = "EASEL_BOUNDS_POLICY";
pub const ENV_DISPLAY_SCALE: &str = "EASEL_DISPLAY_SCALE";
pub const ENV_CANVAS_WIDTH: &str = "EASEL_CANVAS_WIDTH";
pub const ENV_CANVAS_HEIGHT: &str = "EASEL_CANVAS_HEIGHT";

const ENV_KEYS: [&str; 6] =
    [ENV_ZOOM_MIN, ENV_ZOOM_MAX, ENV_BOUNDS_POLICY, ENV_DISPLAY_SCALE, ENV_CANVAS_WIDTH, ENV_CANVAS_HEIGHT];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid zoom range [{min}, {max}]: bounds must be positive and min <= max")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("{key} is not valid unicode: {value:?}")]
    NotUnicode { key: String, value: String },
    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: String, value: String },
    #[error("unknown EASEL_BOUNDS_POLICY: {0} (expected 'unconstrained' or 'constrained')")]
    UnknownBoundsPolicy(String),
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },
}

/// Whether gestures may push a box outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Boxes may be dragged or resized partially or fully off the canvas.
    #[default]
    Unconstrained,
    /// Box edges are kept inside `[0, canvas width/height]`.
    Constrained,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub zoom_range: ZoomRange,
    pub bounds: BoundsPolicy,
    /// Display scale a session starts at, already clamped into `zoom_range`.
    pub display_scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let zoom_range = ZoomRange::default();
        Self {
            zoom_range,
            bounds: BoundsPolicy::Unconstrained,
            display_scale: zoom_range.clamp(DEFAULT_DISPLAY_SCALE),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl EditorConfig {
    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `EASEL_ZOOM_MIN` / `EASEL_ZOOM_MAX`: default 0.1 / 3.0
    /// - `EASEL_BOUNDS_POLICY`: `unconstrained` (default) or `constrained`
    /// - `EASEL_DISPLAY_SCALE`: default 0.3, clamped into the zoom range
    /// - `EASEL_CANVAS_WIDTH` / `EASEL_CANVAS_HEIGHT`: default 2560 / 1440
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for non-unicode values, malformed numbers, an
    /// unknown bounds policy, an empty or inverted zoom range, or a
    /// non-positive canvas size.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = HashMap::new();
        for key in ENV_KEYS {
            if let Some(value) = env_value(key, std::env::var(key))? {
                vars.insert(key, value);
            }
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min = parse_f64(&lookup, ENV_ZOOM_MIN, defaults.zoom_range.min())?;
        let max = parse_f64(&lookup, ENV_ZOOM_MAX, defaults.zoom_range.max())?;
        let zoom_range = ZoomRange::new(min, max)?;

        let bounds = parse_bounds(lookup(ENV_BOUNDS_POLICY).as_deref())?;
        let display_scale = zoom_range.clamp(parse_f64(&lookup, ENV_DISPLAY_SCALE, DEFAULT_DISPLAY_SCALE)?);

        let canvas_width = parse_f64(&lookup, ENV_CANVAS_WIDTH, defaults.canvas_width)?;
        let canvas_height = parse_f64(&lookup, ENV_CANVAS_HEIGHT, defaults.canvas_height)?;
        if canvas_width <= 0.0 || canvas_height <= 0.0 {
            return Err(ConfigError::InvalidCanvasSize { width: canvas_width, height: canvas_height });
        }

        Ok(Self { zoom_range, bounds, display_scale, canvas_width, canvas_height })
    }
}

/// Unset reads as `None`; a set but non-unicode value is an error.
fn env_value(key: &str, var: Result<String, VarError>) -> Result<Option<String>, ConfigError> {
    match var {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            Err(ConfigError::NotUnicode { key: key.to_string(), value: raw.to_string_lossy().into_owned() })
        }
    }
}

fn parse_f64<F>(lookup: &F, key: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ConfigError::InvalidNumber { key: key.to_string(), value: raw }),
    }
}

fn parse_bounds(raw: Option<&str>) -> Result<BoundsPolicy, ConfigError> {
    match raw.unwrap_or("unconstrained") {
        "unconstrained" => Ok(BoundsPolicy::Unconstrained),
        "constrained" => Ok(BoundsPolicy::Constrained),
        other => Err(ConfigError::UnknownBoundsPolicy(other.to_string())),
    }
}
