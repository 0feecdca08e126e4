//! Scripted editor sessions.
//!
//! A replay script is a JSON document listing host events in order. Running it
//! drives a fresh [`EngineCore`] exactly as a browser host would and yields the
//! export snapshot of the final document. Boxes are addressed by their
//! position in the store, since ids are generated at creation time.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EditorConfig};
use crate::doc::{BoxId, ImageSource, PartialBox};
use crate::engine::{Action, EngineCore, ExportSnapshot};
use crate::input::{Button, Key, Modifiers, WheelDelta};
use crate::pan::Axis;
use crate::scroll::ScrollViewport;
use crate::settings::PartialCanvasSettings;
use crate::space::{Point, Rect};
use crate::transform::Transform3D;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

fn default_origin() -> Option<Rect> {
    Some(Rect::default())
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    AddTextBox,
    AddImageBox {
        source: String,
        width: f64,
        height: f64,
    },
    DeleteBox {
        index: usize,
    },
    Select {
        index: Option<usize>,
    },
    UpdateBox {
        index: usize,
        patch: PartialBox,
    },
    SetGeometry {
        index: usize,
        rect: Rect,
    },
    MoveForward {
        index: usize,
    },
    MoveBackward {
        index: usize,
    },
    UpdateSettings {
        settings: PartialCanvasSettings,
    },
    SetDisplayScale {
        scale: f64,
    },
    SetTransform {
        transform: Transform3D,
    },
    ResetTransform,
    ResetImagePosition {
        index: usize,
    },
    SetImageOffset {
        index: usize,
        axis: Axis,
        value: f64,
    },
    SetImageScale {
        index: usize,
        value: f64,
    },
    /// `origin` defaults to a container at the screen origin; `null` means
    /// the container is not mounted.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default = "default_origin")]
        origin: Option<Rect>,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default = "default_origin")]
        origin: Option<Rect>,
    },
    PointerUp,
    Wheel {
        #[serde(default)]
        dx: f64,
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    ZoomIn,
    ZoomOut,
    ZoomTo {
        scale: f64,
    },
    Frame {
        now_ms: f64,
    },
    Layout {
        viewport: Option<ScrollViewport>,
    },
    Teardown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<ReplayEvent>,
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] when the text is not a valid script.
pub fn parse(json: &str) -> Result<ReplayScript, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] when the file cannot be read and
/// [`ReplayError::Parse`] when its contents are not a valid script.
pub fn load(path: &Path) -> Result<ReplayScript, ReplayError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
    parse(&text)
}

/// Result of running a script.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub snapshot: ExportSnapshot,
    /// Every action the engine emitted, in order.
    pub actions: Vec<Action>,
}

/// Drive a fresh engine through `script`.
#[must_use]
pub fn run(script: &ReplayScript, config: EditorConfig) -> ReplayOutcome {
    let mut core = EngineCore::with_config(config);
    let mut actions = Vec::new();

    for (step, event) in script.events.iter().enumerate() {
        let emitted = apply(&mut core, event);
        tracing::trace!(step, ?event, actions = emitted.len(), "replay step");
        actions.extend(emitted);
    }

    let snapshot = core.begin_export();
    core.end_export();
    tracing::debug!(events = script.events.len(), boxes = snapshot.boxes.len(), "replay finished");
    ReplayOutcome { snapshot, actions }
}

fn box_at(core: &EngineCore, index: usize) -> Option<BoxId> {
    let id = core.boxes.get_at(index).map(|b| b.id);
    if id.is_none() {
        tracing::warn!(index, "replay event references a missing box");
    }
    id
}

fn apply(core: &mut EngineCore, event: &ReplayEvent) -> Vec<Action> {
    match event {
        ReplayEvent::AddTextBox => core.add_text_box(),
        ReplayEvent::AddImageBox { source, width, height } => {
            core.add_image_box(ImageSource { source: source.clone(), width: *width, height: *height })
        }
        ReplayEvent::DeleteBox { index } => match box_at(core, *index) {
            Some(id) => core.delete_box(&id),
            None => Vec::new(),
        },
        ReplayEvent::Select { index: None } => core.select(None),
        ReplayEvent::Select { index: Some(index) } => match box_at(core, *index) {
            Some(id) => core.select(Some(id)),
            None => Vec::new(),
        },
        ReplayEvent::UpdateBox { index, patch } => match box_at(core, *index) {
            Some(id) => core.update_box(&id, patch),
            None => Vec::new(),
        },
        ReplayEvent::SetGeometry { index, rect } => match box_at(core, *index) {
            Some(id) => core.set_box_geometry(&id, *rect),
            None => Vec::new(),
        },
        ReplayEvent::MoveForward { index } => match box_at(core, *index) {
            Some(id) => core.move_forward(&id),
            None => Vec::new(),
        },
        ReplayEvent::MoveBackward { index } => match box_at(core, *index) {
            Some(id) => core.move_backward(&id),
            None => Vec::new(),
        },
        ReplayEvent::UpdateSettings { settings } => core.update_settings(settings),
        ReplayEvent::SetDisplayScale { scale } => core.set_display_scale(*scale),
        ReplayEvent::SetTransform { transform } => core.set_transform(*transform),
        ReplayEvent::ResetTransform => core.reset_transform(),
        ReplayEvent::ResetImagePosition { index } => core.reset_image_position(*index),
        ReplayEvent::SetImageOffset { index, axis, value } => core.set_image_offset(*index, *axis, *value),
        ReplayEvent::SetImageScale { index, value } => core.set_image_scale(*index, *value),
        ReplayEvent::PointerDown { x, y, button, modifiers, origin } => {
            core.on_pointer_down(Point::new(*x, *y), *button, *modifiers, *origin)
        }
        ReplayEvent::PointerMove { x, y, origin } => core.on_pointer_move(Point::new(*x, *y), *origin),
        ReplayEvent::PointerUp => core.on_pointer_up(),
        ReplayEvent::Wheel { dx, dy, modifiers } => core.on_wheel(WheelDelta { dx: *dx, dy: *dy }, *modifiers),
        ReplayEvent::KeyDown { key, modifiers } => core.on_key_down(&Key(key.clone()), *modifiers),
        ReplayEvent::ZoomIn => core.zoom_in(),
        ReplayEvent::ZoomOut => core.zoom_out(),
        ReplayEvent::ZoomTo { scale } => core.zoom_to(*scale),
        ReplayEvent::Frame { now_ms } => core.on_frame(*now_ms),
        ReplayEvent::Layout { viewport } => core.on_layout(*viewport),
        ReplayEvent::Teardown => core.teardown(),
    }
}
