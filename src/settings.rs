//! Canvas-wide settings edited by the canvas panel.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DISPLAY_SCALE};
use crate::space::Size;

/// Smallest and largest accepted canvas edge, in pixels.
pub const CANVAS_EDGE_MIN: f64 = 100.0;
pub const CANVAS_EDGE_MAX: f64 = 3000.0;

/// Export quality bounds, in percent.
pub const EXPORT_QUALITY_MIN: u8 = 10;
pub const EXPORT_QUALITY_MAX: u8 = 100;

/// Encoded format of the rasterized export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// MIME type passed to the encoder.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Canvas configuration.
///
/// `display_scale` is session state: it is never serialized and comes back as
/// the default when settings are loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSettings {
    /// True canvas width in pixels.
    pub width: f64,
    /// True canvas height in pixels.
    pub height: f64,
    /// CSS fill or gradient.
    pub background: String,
    pub export_scale: f64,
    pub export_format: ExportFormat,
    /// Export quality in percent.
    pub export_quality: u8,
    #[serde(skip, default = "default_display_scale")]
    pub display_scale: f64,
}

fn default_display_scale() -> f64 {
    DEFAULT_DISPLAY_SCALE
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background: "#f5f5f5".into(),
            export_scale: 1.0,
            export_format: ExportFormat::Png,
            export_quality: 90,
            display_scale: DEFAULT_DISPLAY_SCALE,
        }
    }
}

impl CanvasSettings {
    /// Unscaled canvas size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Sparse canvas-panel update. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCanvasSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_format: Option<ExportFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_quality: Option<u8>,
    /// Direct display-scale write; bypasses the zoom animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_scale: Option<f64>,
}

impl CanvasSettings {
    /// Apply everything except `display_scale`, which the zoom controller owns.
    /// Out-of-range sizes and quality are clamped.
    pub fn apply_partial(&mut self, partial: &PartialCanvasSettings) {
        if let Some(w) = partial.width {
            self.width = w.clamp(CANVAS_EDGE_MIN, CANVAS_EDGE_MAX);
        }
        if let Some(h) = partial.height {
            self.height = h.clamp(CANVAS_EDGE_MIN, CANVAS_EDGE_MAX);
        }
        if let Some(ref bg) = partial.background {
            self.background.clone_from(bg);
        }
        if let Some(s) = partial.export_scale {
            if s > 0.0 {
                self.export_scale = s;
            }
        }
        if let Some(f) = partial.export_format {
            self.export_format = f;
        }
        if let Some(q) = partial.export_quality {
            self.export_quality = q.clamp(EXPORT_QUALITY_MIN, EXPORT_QUALITY_MAX);
        }
    }
}
