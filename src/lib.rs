//! Interaction engine for a single-page image and text canvas editor.
//!
//! The crate owns everything between raw host events and the document: it maps
//! pointer positions between screen and canvas space, runs the drag, resize and
//! image-pan gestures, animates the display scale, keeps the viewport centered
//! across zooms, and composes the per-box CSS transforms. The host layer only
//! wires DOM events in and carries out the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state and the event-to-action core, [`engine::EngineCore`] |
//! | [`doc`] | Boxes, their styling, and the in-memory store |
//! | [`settings`] | Canvas size, background and export settings |
//! | [`space`] | Points, rectangles and screen/canvas conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing boxes and resize handles |
//! | [`drag`] | Shift-drag box movement |
//! | [`resize`] | Handle-drag resizing with a minimum size |
//! | [`pan`] | Per-image pan offset and scale |
//! | [`transform`] | 3D transform state and CSS transform composition |
//! | [`zoom`] | Animated display-scale controller |
//! | [`scroll`] | Viewport re-centering across zooms |
//! | [`config`] | Environment-driven engine configuration |
//! | [`replay`] | JSON event scripts driving a headless session |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod drag;
pub mod engine;
pub mod hit;
pub mod input;
pub mod pan;
pub mod replay;
pub mod resize;
pub mod scroll;
pub mod settings;
pub mod space;
pub mod transform;
pub mod zoom;
