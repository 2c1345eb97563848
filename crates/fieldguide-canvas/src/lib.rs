//! # FieldGuide Canvas
//!
//! Interactive guidance canvas: world/screen viewport transform, parallel
//! track generation from an AB-line, the heading-adjustment handle, the
//! pointer interaction state machine and a tiny-skia renderer.
//!
//! [`FieldCanvas`] is the entry point; the modules are public for hosts
//! that need the pieces on their own.

pub mod canvas;
pub mod font_manager;
pub mod guidance;
pub mod handle;
pub mod interaction;
pub mod renderer;
pub mod scene;
pub mod viewport;

pub use canvas::{CursorHint, FieldCanvas, PointerResponse, StatusReadout};
pub use guidance::{current_track_index, GridParams, GuidanceGrid, Track, TrackCache, TrackClass};
pub use handle::handle_position;
pub use interaction::{DragMode, InteractionState, MoveOutcome, PointerContext};
pub use renderer::{heading_label, render_frame, RenderInput, RenderStats};
pub use scene::FieldScene;
pub use viewport::Viewport;
