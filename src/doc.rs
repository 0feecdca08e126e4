//! Document model: boxes, their styling, and the in-memory store.
//!
//! This module defines what sits on the canvas (`CanvasBox`, `BoxContent`,
//! `BoxStyle`, `ImageSettings`), a sparse-update type for property-panel edits
//! (`PartialBox`), and the runtime store that owns every live box (`BoxStore`).
//!
//! Geometry is always in canvas units. The store keeps boxes in insertion order
//! so positional indices stay meaningful for per-image transient state; draw
//! order comes from `sorted_boxes`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{IMAGE_MAX_CANVAS_FRACTION, MIN_BOX_SIZE, TEXT_BOX_HEIGHT, TEXT_BOX_WIDTH};
use crate::space::{Rect, Size};

/// Unique identifier for a box.
pub type BoxId = Uuid;

/// Placeholder text for a freshly added text box.
pub const DEFAULT_TEXT: &str = "Text Box Content";

/// The kind of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    Image,
    Text,
}

/// What a box displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BoxContent {
    /// Reference to decoded image data (data URL or host handle).
    Image { source: String },
    /// Literal text.
    Text { text: String },
}

impl BoxContent {
    #[must_use]
    pub fn kind(&self) -> BoxKind {
        match self {
            Self::Image { .. } => BoxKind::Image,
            Self::Text { .. } => BoxKind::Text,
        }
    }
}

/// Visual attributes of a box. None of these affect geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    pub background_color: String,
    pub has_background: bool,
    pub border_width: f64,
    pub border_color: String,
    pub border_radius: f64,
    pub has_border: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    pub shadow: bool,
    pub shadow_color: String,
    pub text_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            background_color: "white".into(),
            has_background: false,
            border_width: 1.0,
            border_color: "#e2e8f0".into(),
            border_radius: 8.0,
            has_border: false,
            opacity: 1.0,
            shadow: false,
            shadow_color: "rgba(0,0,0,0.1)".into(),
            text_color: "#000000".into(),
            font_size: None,
            font_weight: None,
            font_family: None,
            text_align: None,
            padding: None,
        }
    }
}

impl BoxStyle {
    /// CSS `border` shorthand, or `"none"` when the border is disabled.
    #[must_use]
    pub fn border_css(&self) -> String {
        if self.has_border {
            format!("{}px solid {}", self.border_width, self.border_color)
        } else {
            "none".into()
        }
    }

    /// CSS `box-shadow` value, or `"none"` when the shadow is disabled.
    #[must_use]
    pub fn shadow_css(&self) -> String {
        if self.shadow {
            format!("0 4px 8px {}", self.shadow_color)
        } else {
            "none".into()
        }
    }

    /// Background fill, `"transparent"` unless enabled.
    #[must_use]
    pub fn background_css(&self) -> &str {
        if self.has_background { &self.background_color } else { "transparent" }
    }
}

/// How an image is laid out inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Fill the box, cropping overflow.
    #[default]
    Cover,
    /// Fit entirely inside the box, letterboxing the rest.
    Contain,
    /// Intrinsic size times the per-image scale; free to pan.
    Original,
}

/// Image-only settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub fit: ImageFit,
    /// Intrinsic pixel width of the decoded image.
    pub width: f64,
    /// Intrinsic pixel height of the decoded image.
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl ImageSettings {
    /// Placement of the image content relative to the box's top-left corner,
    /// in canvas units, for a box of size `frame`.
    #[must_use]
    pub fn content_rect(&self, frame: Size) -> Rect {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Rect::new(0.0, 0.0, frame.width, frame.height);
        }
        let sx = frame.width / self.width;
        let sy = frame.height / self.height;
        let s = match self.fit {
            ImageFit::Cover => sx.max(sy),
            ImageFit::Contain => sx.min(sy),
            ImageFit::Original => self.scale.unwrap_or(1.0),
        };
        let w = self.width * s;
        let h = self.height * s;
        Rect::new((frame.width - w) * 0.5, (frame.height - h) * 0.5, w, h)
    }
}

/// A decoded image handed over by the ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub source: String,
    pub width: f64,
    pub height: f64,
}

/// A box as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBox {
    pub id: BoxId,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Width in canvas units, never below [`MIN_BOX_SIZE`].
    pub width: f64,
    /// Height in canvas units, never below [`MIN_BOX_SIZE`].
    pub height: f64,
    pub content: BoxContent,
    pub style: BoxStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_settings: Option<ImageSettings>,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
}

impl CanvasBox {
    /// A text box centered on a canvas of the given size.
    #[must_use]
    pub fn text(canvas: Size, z_index: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: canvas.width / 2.0 - TEXT_BOX_WIDTH / 2.0,
            y: canvas.height / 2.0 - TEXT_BOX_HEIGHT / 2.0,
            width: TEXT_BOX_WIDTH,
            height: TEXT_BOX_HEIGHT,
            content: BoxContent::Text { text: DEFAULT_TEXT.into() },
            style: BoxStyle::default(),
            image_settings: None,
            z_index,
        }
    }

    /// An image box sized to fit within 70% of the canvas (aspect preserved)
    /// and centered on it.
    #[must_use]
    pub fn image(image: ImageSource, canvas: Size, z_index: i64) -> Self {
        let max_w = canvas.width * IMAGE_MAX_CANVAS_FRACTION;
        let max_h = canvas.height * IMAGE_MAX_CANVAS_FRACTION;
        let mut w = image.width;
        let mut h = image.height;
        if w > max_w {
            h *= max_w / w;
            w = max_w;
        }
        if h > max_h {
            w *= max_h / h;
            h = max_h;
        }
        let w = w.max(MIN_BOX_SIZE);
        let h = h.max(MIN_BOX_SIZE);

        Self {
            id: Uuid::new_v4(),
            x: (canvas.width - w) / 2.0,
            y: (canvas.height - h) / 2.0,
            width: w,
            height: h,
            content: BoxContent::Image { source: image.source },
            style: BoxStyle::default(),
            image_settings: Some(ImageSettings {
                fit: ImageFit::Cover,
                width: image.width,
                height: image.height,
                scale: None,
            }),
            z_index,
        }
    }

    #[must_use]
    pub fn kind(&self) -> BoxKind {
        self.content.kind()
    }

    /// Bounding rectangle in canvas units.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Fit mode, if this is an image box.
    #[must_use]
    pub fn fit(&self) -> Option<ImageFit> {
        self.image_settings.map(|s| s.fit)
    }
}

/// Sparse property-panel update. Geometry is deliberately absent: it only
/// changes through gestures or [`BoxStore::set_geometry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialBox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BoxContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BoxStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_settings: Option<ImageSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// In-memory ordered store of boxes.
#[derive(Debug, Clone, Default)]
pub struct BoxStore {
    boxes: Vec<CanvasBox>,
}

impl BoxStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Append a box, flooring its size. Returns its positional index.
    pub fn insert(&mut self, mut b: CanvasBox) -> usize {
        b.width = b.width.max(MIN_BOX_SIZE);
        b.height = b.height.max(MIN_BOX_SIZE);
        self.boxes.push(b);
        self.boxes.len() - 1
    }

    /// Remove a box by id, returning its former index and the box.
    pub fn remove(&mut self, id: &BoxId) -> Option<(usize, CanvasBox)> {
        let index = self.index_of(id)?;
        Some((index, self.boxes.remove(index)))
    }

    #[must_use]
    pub fn get(&self, id: &BoxId) -> Option<&CanvasBox> {
        self.boxes.iter().find(|b| b.id == *id)
    }

    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&CanvasBox> {
        self.boxes.get(index)
    }

    /// Positional index of a box.
    #[must_use]
    pub fn index_of(&self, id: &BoxId) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == *id)
    }

    /// Boxes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasBox> {
        self.boxes.iter()
    }

    /// Highest z-index in the store, never below zero.
    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        self.boxes.iter().map(|b| b.z_index).fold(0, i64::max)
    }

    /// Move a box's top-left corner. Returns false if the box doesn't exist.
    pub fn set_position(&mut self, id: &BoxId, x: f64, y: f64) -> bool {
        let Some(b) = self.get_mut(id) else {
            return false;
        };
        b.x = x;
        b.y = y;
        true
    }

    /// Replace a box's whole geometry, flooring width and height.
    pub fn set_geometry(&mut self, id: &BoxId, rect: Rect) -> bool {
        let Some(b) = self.get_mut(id) else {
            return false;
        };
        b.x = rect.x;
        b.y = rect.y;
        b.width = rect.width.max(MIN_BOX_SIZE);
        b.height = rect.height.max(MIN_BOX_SIZE);
        true
    }

    /// Apply a property-panel update. Returns false if the box doesn't exist,
    /// the new content would change the box's kind, or image settings are
    /// sent for a text box. Nothing is applied when false is returned.
    pub fn apply_partial(&mut self, id: &BoxId, partial: &PartialBox) -> bool {
        let Some(b) = self.get_mut(id) else {
            return false;
        };
        if let Some(ref content) = partial.content {
            if content.kind() != b.kind() {
                return false;
            }
        }
        if partial.image_settings.is_some() && b.kind() != BoxKind::Image {
            return false;
        }

        if let Some(ref content) = partial.content {
            b.content = content.clone();
        }
        if let Some(ref style) = partial.style {
            b.style = style.clone();
            b.style.opacity = b.style.opacity.clamp(0.0, 1.0);
        }
        if let Some(settings) = partial.image_settings {
            b.image_settings = Some(settings);
        }
        if let Some(z) = partial.z_index {
            b.z_index = z;
        }
        true
    }

    /// Raise a box one step. Returns the new z-index.
    pub fn move_forward(&mut self, id: &BoxId) -> Option<i64> {
        let b = self.get_mut(id)?;
        b.z_index += 1;
        Some(b.z_index)
    }

    /// Lower a box one step. Returns the new z-index.
    pub fn move_backward(&mut self, id: &BoxId) -> Option<i64> {
        let b = self.get_mut(id)?;
        b.z_index -= 1;
        Some(b.z_index)
    }

    /// Boxes sorted by z-index for draw order; ties keep insertion order.
    #[must_use]
    pub fn sorted_boxes(&self) -> Vec<&CanvasBox> {
        let mut out: Vec<&CanvasBox> = self.boxes.iter().collect();
        out.sort_by_key(|b| b.z_index);
        out
    }

    /// Number of boxes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns `true` if the store contains no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    fn get_mut(&mut self, id: &BoxId) -> Option<&mut CanvasBox> {
        self.boxes.iter_mut().find(|b| b.id == *id)
    }
}
