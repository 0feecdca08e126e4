//! Editor session core.
//!
//! `EngineCore` owns every piece of session state and turns host events into
//! state changes plus a list of [`Action`]s for the host to carry out (attach
//! listeners, schedule frames, scroll, re-render). It never touches the DOM or
//! a clock, so the whole editor is testable as plain Rust.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::doc::{BoxId, BoxStore, CanvasBox, ImageFit, ImageSource, PartialBox};
use crate::drag::DragGesture;
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, Gesture, Key, Modifiers, UiState, WheelDelta};
use crate::pan::{Axis, ImagePan, ImagePanStore, PanGesture};
use crate::resize::ResizeGesture;
use crate::scroll::{FocusAnchor, ScrollPosition, ScrollViewport};
use crate::settings::{CanvasSettings, ExportFormat, PartialCanvasSettings};
use crate::space::{Point, Rect, Size, scale_rect, to_canvas};
use crate::transform::{SelectionState, Transform3D, TransformDescriptor, compose_transform};
use crate::zoom::{FrameRequest, ZoomController, ZoomDirection};

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BoxCreated(CanvasBox),
    BoxUpdated { id: BoxId },
    BoxDeleted { id: BoxId },
    SelectionChanged(Option<BoxId>),
    ImagePanned { index: usize, pan: ImagePan },
    /// Route pointer move/up events from the whole document to the engine.
    AttachDocumentListeners,
    DetachDocumentListeners,
    SetCursor(String),
    RequestFrame,
    CancelFrame,
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
    ScrollTo(ScrollPosition),
    RenderNeeded,
}

/// Everything an exporter needs to render the canvas at full resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub export_scale: f64,
    pub export_format: ExportFormat,
    pub export_quality: u8,
    pub transform: Transform3D,
    /// Boxes in draw order.
    pub boxes: Vec<CanvasBox>,
}

/// Core engine state.
pub struct EngineCore {
    pub boxes: BoxStore,
    pub settings: CanvasSettings,
    pub zoom: ZoomController,
    pub transform3d: Transform3D,
    pub image_pans: ImagePanStore,
    pub ui: UiState,
    pub gesture: Gesture,
    pub config: EditorConfig,
    focus: Option<FocusAnchor>,
    last_viewport: Option<ScrollViewport>,
    /// Display scale to restore when an export finishes.
    export_restore: Option<f64>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let settings = CanvasSettings {
            width: config.canvas_width,
            height: config.canvas_height,
            display_scale: config.display_scale,
            ..CanvasSettings::default()
        };
        Self {
            boxes: BoxStore::new(),
            settings,
            zoom: ZoomController::new(config.zoom_range, config.display_scale),
            transform3d: Transform3D::default(),
            image_pans: ImagePanStore::new(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            config,
            focus: None,
            last_viewport: None,
            export_restore: None,
        }
    }

    // --- Boxes ---

    /// Add a centered text box on top of the stack and select it.
    pub fn add_text_box(&mut self) -> Vec<Action> {
        let b = CanvasBox::text(self.settings.size(), self.boxes.max_z_index() + 1);
        self.insert_box(b)
    }

    /// Add an image box fitted into the canvas, on top of the stack, and select it.
    pub fn add_image_box(&mut self, image: ImageSource) -> Vec<Action> {
        let b = CanvasBox::image(image, self.settings.size(), self.boxes.max_z_index() + 1);
        self.insert_box(b)
    }

    fn insert_box(&mut self, b: CanvasBox) -> Vec<Action> {
        let id = b.id;
        tracing::debug!(%id, kind = ?b.kind(), z = b.z_index, "box created");
        self.boxes.insert(b.clone());
        self.image_pans.ensure_len(self.boxes.len());
        self.ui.selected_id = Some(id);
        vec![Action::BoxCreated(b), Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    pub fn delete_box(&mut self, id: &BoxId) -> Vec<Action> {
        let Some((index, _)) = self.boxes.remove(id) else {
            return Vec::new();
        };
        tracing::debug!(%id, index, "box deleted");
        self.image_pans.remove(index);

        let mut actions = Vec::new();
        if self.gesture.box_id() == Some(*id) {
            actions.extend(self.end_gesture());
        }
        actions.push(Action::BoxDeleted { id: *id });
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Select a box, or clear the selection with `None`. Unknown ids are ignored.
    pub fn select(&mut self, id: Option<BoxId>) -> Vec<Action> {
        if let Some(id) = id {
            if self.boxes.get(&id).is_none() {
                return Vec::new();
            }
        }
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Apply a property-panel edit. Geometry is not touched.
    pub fn update_box(&mut self, id: &BoxId, partial: &PartialBox) -> Vec<Action> {
        if !self.boxes.apply_partial(id, partial) {
            return Vec::new();
        }
        vec![Action::BoxUpdated { id: *id }, Action::RenderNeeded]
    }

    /// Set a box's geometry directly. Size is floored like a resize.
    pub fn set_box_geometry(&mut self, id: &BoxId, rect: Rect) -> Vec<Action> {
        if !self.boxes.set_geometry(id, rect) {
            return Vec::new();
        }
        vec![Action::BoxUpdated { id: *id }, Action::RenderNeeded]
    }

    pub fn move_forward(&mut self, id: &BoxId) -> Vec<Action> {
        match self.boxes.move_forward(id) {
            Some(_) => vec![Action::BoxUpdated { id: *id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    pub fn move_backward(&mut self, id: &BoxId) -> Vec<Action> {
        match self.boxes.move_backward(id) {
            Some(_) => vec![Action::BoxUpdated { id: *id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Canvas settings ---

    pub fn update_settings(&mut self, partial: &PartialCanvasSettings) -> Vec<Action> {
        self.settings.apply_partial(partial);
        let mut actions = match partial.display_scale {
            Some(scale) => self.set_display_scale(scale),
            None => Vec::new(),
        };
        if !actions.contains(&Action::RenderNeeded) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Jump to a display scale without animating (fit-to-screen, slider).
    pub fn set_display_scale(&mut self, scale: f64) -> Vec<Action> {
        if self.is_exporting() {
            return Vec::new();
        }
        self.capture_focus();
        let cancelled = self.zoom.set_immediate(scale);
        self.sync_display_scale();
        tracing::debug!(scale = self.zoom.current(), "display scale set");

        let mut actions = Vec::new();
        if cancelled {
            actions.push(Action::CancelFrame);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- 3D transform ---

    pub fn set_transform(&mut self, transform: Transform3D) -> Vec<Action> {
        self.transform3d = transform.clamped();
        vec![Action::RenderNeeded]
    }

    pub fn reset_transform(&mut self) -> Vec<Action> {
        self.set_transform(Transform3D::default())
    }

    // --- Image pan ---

    pub fn reset_image_position(&mut self, index: usize) -> Vec<Action> {
        if index >= self.boxes.len() {
            return Vec::new();
        }
        let pan = self.image_pans.reset_position(index);
        vec![Action::ImagePanned { index, pan }, Action::RenderNeeded]
    }

    pub fn set_image_offset(&mut self, index: usize, axis: Axis, value: f64) -> Vec<Action> {
        if index >= self.boxes.len() {
            return Vec::new();
        }
        let pan = self.image_pans.set_offset(index, axis, value);
        vec![Action::ImagePanned { index, pan }, Action::RenderNeeded]
    }

    pub fn set_image_scale(&mut self, index: usize, value: f64) -> Vec<Action> {
        if index >= self.boxes.len() {
            return Vec::new();
        }
        let pan = self.image_pans.set_scale(index, value);
        vec![Action::ImagePanned { index, pan }, Action::RenderNeeded]
    }

    // --- Pointer events ---

    /// Primary pointer-down at `screen`. `origin` is the canvas container's
    /// screen rect; without it the event cannot be mapped and is ignored.
    pub fn on_pointer_down(
        &mut self,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
        origin: Option<Rect>,
    ) -> Vec<Action> {
        if button != Button::Primary || self.gesture.is_active() {
            return Vec::new();
        }
        let Some(origin) = origin else {
            return Vec::new();
        };
        let scale = self.display_scale();
        let canvas_pt = to_canvas(screen, &origin, scale);
        let previously_selected = self.ui.selected_id;

        let Some(hit) = hit_test(canvas_pt, &self.boxes, scale, previously_selected) else {
            return self.select(None);
        };
        let Some(b) = self.boxes.get(&hit.box_id) else {
            return Vec::new();
        };

        let mut actions = Vec::new();
        let (gesture, cursor) = match hit.part {
            HitPart::ResizeHandle(anchor) => {
                (Some(Gesture::Resizing(ResizeGesture::begin(b, anchor, screen))), anchor.cursor())
            }
            HitPart::Body if modifiers.shift => {
                (Some(Gesture::Dragging(DragGesture::begin(b, screen, &origin, scale))), "grabbing")
            }
            HitPart::Body if previously_selected == Some(b.id) && b.fit() == Some(ImageFit::Original) => {
                (Some(Gesture::PanningImage(PanGesture::begin(b.id, screen))), "grabbing")
            }
            HitPart::Body => (None, "default"),
        };

        // Shift is the drag modifier; it leaves the selection alone.
        if !(modifiers.shift && hit.part == HitPart::Body) {
            actions.extend(self.select(Some(hit.box_id)));
        }
        if let Some(gesture) = gesture {
            tracing::debug!(id = %hit.box_id, gesture = gesture.name(), "gesture start");
            self.gesture = gesture;
            actions.push(Action::AttachDocumentListeners);
            actions.push(Action::SetCursor(cursor.into()));
            if !actions.contains(&Action::RenderNeeded) {
                actions.push(Action::RenderNeeded);
            }
        }
        actions
    }

    /// Pointer moved anywhere in the document while a gesture is active.
    pub fn on_pointer_move(&mut self, screen: Point, origin: Option<Rect>) -> Vec<Action> {
        let scale = self.display_scale();
        let canvas = self.settings.size();
        let bounds = self.config.bounds;

        match &mut self.gesture {
            Gesture::Idle => Vec::new(),
            Gesture::Dragging(g) => {
                let Some(b) = self.boxes.get(&g.id) else {
                    return Vec::new();
                };
                let size = Size::new(b.width, b.height);
                let Some(pos) = g.update(screen, origin.as_ref(), scale, size, canvas, bounds) else {
                    return Vec::new();
                };
                let id = g.id;
                self.boxes.set_position(&id, pos.x, pos.y);
                tracing::trace!(%id, x = pos.x, y = pos.y, "drag");
                vec![Action::BoxUpdated { id }, Action::RenderNeeded]
            }
            Gesture::Resizing(g) => {
                let rect = g.update(screen, scale, canvas, bounds);
                let id = g.id;
                if !self.boxes.set_geometry(&id, rect) {
                    return Vec::new();
                }
                tracing::trace!(%id, w = rect.width, h = rect.height, "resize");
                vec![Action::BoxUpdated { id }, Action::RenderNeeded]
            }
            Gesture::PanningImage(g) => {
                let delta = g.advance(screen);
                let Some(index) = self.boxes.index_of(&g.id) else {
                    return Vec::new();
                };
                let pan = self.image_pans.pan_by(index, delta);
                tracing::trace!(index, x = pan.x, y = pan.y, "image pan");
                vec![Action::ImagePanned { index, pan }, Action::RenderNeeded]
            }
        }
    }

    /// Pointer released anywhere. Always ends the active gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        if !self.gesture.is_active() {
            return Vec::new();
        }
        tracing::debug!(gesture = self.gesture.name(), "gesture end");
        self.gesture = Gesture::Idle;
        vec![Action::DetachDocumentListeners, Action::SetCursor("default".into()), Action::RenderNeeded]
    }

    // --- Zoom ---

    /// Ctrl+wheel zooms; a plain wheel scrolls natively and produces nothing.
    pub fn on_wheel(&mut self, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.ctrl {
            return Vec::new();
        }
        if self.is_exporting() {
            return vec![Action::PreventDefault];
        }
        let request = self.zoom.zoom_wheel(delta.dy);
        let mut actions = vec![Action::PreventDefault];
        actions.extend(self.after_zoom_request(request));
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.ctrl {
            return Vec::new();
        }
        let zoom = match key.0.as_str() {
            "+" | "=" => self.zoom_in(),
            "-" | "_" => self.zoom_out(),
            "0" => self.zoom_to(1.0),
            _ => return Vec::new(),
        };
        let mut actions = vec![Action::PreventDefault];
        actions.extend(zoom);
        actions
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        if self.is_exporting() {
            return Vec::new();
        }
        let request = self.zoom.zoom_by(ZoomDirection::In);
        self.after_zoom_request(request)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        if self.is_exporting() {
            return Vec::new();
        }
        let request = self.zoom.zoom_by(ZoomDirection::Out);
        self.after_zoom_request(request)
    }

    /// Animate to `scale` (zoom presets, `ctrl+0`).
    pub fn zoom_to(&mut self, scale: f64) -> Vec<Action> {
        if self.is_exporting() {
            return Vec::new();
        }
        let request = self.zoom.set_zoom(scale);
        self.after_zoom_request(request)
    }

    fn after_zoom_request(&mut self, request: FrameRequest) -> Vec<Action> {
        match request {
            FrameRequest::None => Vec::new(),
            FrameRequest::Schedule => {
                self.capture_focus();
                tracing::debug!(zoom_target = self.zoom.target(), "zoom start");
                vec![Action::RequestFrame]
            }
            FrameRequest::Reschedule => {
                self.capture_focus();
                tracing::debug!(zoom_target = self.zoom.target(), "zoom retarget");
                vec![Action::CancelFrame, Action::RequestFrame]
            }
        }
    }

    /// Animation-frame callback.
    pub fn on_frame(&mut self, now_ms: f64) -> Vec<Action> {
        if !self.zoom.is_animating() {
            return Vec::new();
        }
        let request = self.zoom.tick(now_ms);
        self.sync_display_scale();

        let mut actions = vec![Action::RenderNeeded];
        if request == FrameRequest::Schedule {
            actions.push(Action::RequestFrame);
        } else {
            tracing::debug!(scale = self.zoom.current(), "zoom settled");
        }
        actions
    }

    /// Layout callback after a render. `None` means the scroll container is
    /// not mounted.
    pub fn on_layout(&mut self, viewport: Option<ScrollViewport>) -> Vec<Action> {
        let Some(mut vp) = viewport else {
            return Vec::new();
        };
        let Some(anchor) = self.focus else {
            self.last_viewport = Some(vp);
            return Vec::new();
        };
        let pos = anchor.recenter(&vp);
        vp.scroll_left = pos.left;
        vp.scroll_top = pos.top;
        self.last_viewport = Some(vp);
        if !self.zoom.is_animating() {
            self.focus = None;
        }
        vec![Action::ScrollTo(pos)]
    }

    fn capture_focus(&mut self) {
        if self.focus.is_none() {
            self.focus = self.last_viewport.as_ref().map(FocusAnchor::capture);
        }
    }

    fn sync_display_scale(&mut self) {
        self.settings.display_scale = self.display_scale();
    }

    /// Release every host resource the session holds.
    pub fn teardown(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.gesture.is_active() {
            self.gesture = Gesture::Idle;
            actions.push(Action::DetachDocumentListeners);
        }
        if self.zoom.is_animating() {
            let target = self.zoom.target();
            self.zoom.set_immediate(target);
            self.sync_display_scale();
            actions.push(Action::CancelFrame);
        }
        self.focus = None;
        tracing::debug!(actions = actions.len(), "teardown");
        actions
    }

    // --- Queries ---

    /// Scale the canvas is currently displayed at.
    #[must_use]
    pub fn display_scale(&self) -> f64 {
        if self.export_restore.is_some() { 1.0 } else { self.zoom.current() }
    }

    #[must_use]
    pub fn selection(&self) -> Option<BoxId> {
        self.ui.selected_id
    }

    /// A box's rectangle in screen pixels relative to the canvas origin.
    #[must_use]
    pub fn box_screen_rect(&self, id: &BoxId) -> Option<Rect> {
        self.boxes.get(id).map(|b| scale_rect(b.rect(), self.display_scale()))
    }

    #[must_use]
    pub fn canvas_screen_size(&self) -> Size {
        let s = self.display_scale();
        Size::new(self.settings.width * s, self.settings.height * s)
    }

    /// Content transform for the box at store position `index`.
    #[must_use]
    pub fn transform_for(&self, index: usize) -> TransformDescriptor {
        let selection = SelectionState {
            selected_index: self.ui.selected_id.and_then(|id| self.boxes.index_of(&id)),
            gesture_active: self.gesture.is_active(),
        };
        compose_transform(index, &selection, &self.transform3d, &self.image_pans)
    }

    #[must_use]
    pub fn sorted_boxes(&self) -> Vec<&CanvasBox> {
        self.boxes.sorted_boxes()
    }

    // --- Export ---

    /// Switch to full resolution for capture. The prior scale comes back with
    /// [`EngineCore::end_export`]; zoom input is ignored until then.
    pub fn begin_export(&mut self) -> ExportSnapshot {
        if self.export_restore.is_none() {
            let target = self.zoom.target();
            self.zoom.set_immediate(target);
            self.export_restore = Some(target);
            self.focus = None;
            self.sync_display_scale();
            tracing::debug!(restore = target, "export begin");
        }
        ExportSnapshot {
            width: self.settings.width,
            height: self.settings.height,
            background: self.settings.background.clone(),
            export_scale: self.settings.export_scale,
            export_format: self.settings.export_format,
            export_quality: self.settings.export_quality,
            transform: self.transform3d,
            boxes: self.boxes.sorted_boxes().into_iter().cloned().collect(),
        }
    }

    pub fn end_export(&mut self) -> Vec<Action> {
        let Some(restore) = self.export_restore.take() else {
            return Vec::new();
        };
        self.zoom.set_immediate(restore);
        self.sync_display_scale();
        tracing::debug!(scale = restore, "export end");
        vec![Action::RenderNeeded]
    }

    #[must_use]
    pub fn is_exporting(&self) -> bool {
        self.export_restore.is_some()
    }
}
