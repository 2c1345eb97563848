//! The field canvas: owns view and interaction state, consumes pointer
//! events, reports heading changes to the host and renders frames.
//!
//! Host data (boundaries, AB-line, machine position) arrives as a
//! [`FieldScene`] with every call and is never mutated here; heading drags
//! are reported through the heading listener and the returned
//! [`PointerResponse`] instead.

use std::fmt;

use fieldguide_core::{GuidanceConfig, HeadingCallback, Point};
use image::RgbaImage;
use tiny_skia::Pixmap;
use tracing::{debug, warn};

use crate::guidance::{current_track_index, GridParams, TrackCache};
use crate::handle::handle_position;
use crate::interaction::{apply_wheel, DragMode, InteractionState, PointerContext};
use crate::renderer::{render_frame, RenderInput, RenderStats};
use crate::scene::FieldScene;
use crate::viewport::Viewport;

/// Cursor the host should show over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Grab,
    Grabbing,
    Pointer,
    Alias,
}

impl CursorHint {
    /// CSS cursor keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
            CursorHint::Pointer => "pointer",
            CursorHint::Alias => "alias",
        }
    }
}

/// One-line status shown under the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReadout {
    pub position: Point,
    pub zoom: f64,
    /// Current pass (track index), 0 without an AB-line.
    pub pass: i32,
}

impl fmt::Display for StatusReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "POS: {} | ZOOM: {:.2}x | PASS: {}",
            self.position, self.zoom, self.pass
        )
    }
}

/// What a pointer event changed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerResponse {
    /// Heading reported to the host during a heading drag.
    pub heading: Option<f64>,
    pub needs_redraw: bool,
}

pub struct FieldCanvas {
    config: GuidanceConfig,
    viewport: Viewport,
    interaction: InteractionState,
    grid_params: GridParams,
    track_cache: TrackCache,
    pixmap: Option<Pixmap>,
    heading_listener: Option<HeadingCallback>,
    dirty: bool,
}

impl fmt::Debug for FieldCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCanvas")
            .field("viewport", &self.viewport)
            .field("mode", &self.interaction.mode())
            .field("dirty", &self.dirty)
            .field("has_heading_listener", &self.heading_listener.is_some())
            .finish()
    }
}

impl FieldCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(width, height, GuidanceConfig::default())
    }

    /// Creates a canvas with explicit tunables. A config that fails
    /// [`GuidanceConfig::validate`] is replaced by the defaults.
    pub fn with_config(width: u32, height: u32, config: GuidanceConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("Invalid canvas config ({}); using defaults", e);
                GuidanceConfig::default()
            }
        };
        let viewport = Viewport::with_config(f64::from(width), f64::from(height), &config);
        let mut canvas = Self {
            grid_params: GridParams::from_config(&config),
            config,
            viewport,
            interaction: InteractionState::new(),
            track_cache: TrackCache::new(),
            pixmap: None,
            heading_listener: None,
            dirty: true,
        };
        canvas.resize(width, height);
        canvas
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn mode(&self) -> DragMode {
        self.interaction.mode()
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn offset(&self) -> Point {
        self.viewport.offset()
    }

    /// Registers the callback fired with every heading produced by a
    /// handle drag.
    pub fn set_heading_listener(&mut self, listener: impl Fn(f64) + 'static) {
        self.heading_listener = Some(Box::new(listener));
    }

    /// Resizes the backing store to the surface's pixel size. A zero-sized
    /// surface keeps no backing store and renders nothing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport
            .set_canvas_size(f64::from(width), f64::from(height));
        self.pixmap = Pixmap::new(width, height);
        if self.pixmap.is_none() {
            warn!("Canvas resized to {}x{}; nothing will be drawn", width, height);
        } else {
            debug!("Canvas resized to {}x{}", width, height);
        }
        self.dirty = true;
    }

    /// Client-space position of the surface's top-left corner; pointer
    /// coordinates are relative to the client area.
    pub fn set_surface_origin(&mut self, left: f64, top: f64) {
        self.viewport.set_surface_origin(left, top);
    }

    /// World position of the heading handle for this scene.
    pub fn handle_position(&self, scene: &FieldScene<'_>) -> Option<Point> {
        handle_position(scene.ab_line, scene.machine, self.config.lookahead_distance)
    }

    pub fn current_track_index(&self, scene: &FieldScene<'_>) -> i32 {
        scene
            .ab_line
            .map(|line| current_track_index(line.heading, line.spacing, scene.machine))
            .unwrap_or(0)
    }

    fn pointer_context(&self, scene: &FieldScene<'_>) -> PointerContext {
        PointerContext {
            handle: self.handle_position(scene),
            machine: scene.machine,
            hit_radius_px: self.config.handle_hit_radius_px,
        }
    }

    pub fn pointer_down(&mut self, client: Point, scene: &FieldScene<'_>) -> PointerResponse {
        let ctx = self.pointer_context(scene);
        let changed = self.interaction.pointer_down(client, &self.viewport, &ctx);
        self.dirty |= changed;
        PointerResponse {
            heading: None,
            needs_redraw: changed,
        }
    }

    pub fn pointer_move(&mut self, client: Point, scene: &FieldScene<'_>) -> PointerResponse {
        let ctx = self.pointer_context(scene);
        let outcome = self
            .interaction
            .pointer_move(client, &mut self.viewport, &ctx);
        // Without an AB-line there is nothing to steer
        let heading = outcome.heading.filter(|_| scene.ab_line.is_some());

        if let (Some(heading), Some(listener)) = (heading, &self.heading_listener) {
            listener(heading);
        }
        self.dirty |= outcome.needs_redraw;
        PointerResponse {
            heading,
            needs_redraw: outcome.needs_redraw,
        }
    }

    pub fn pointer_up(&mut self) -> PointerResponse {
        let changed = self.interaction.pointer_up();
        self.dirty |= changed;
        PointerResponse {
            heading: None,
            needs_redraw: changed,
        }
    }

    /// Same as [`pointer_up`](Self::pointer_up).
    pub fn pointer_leave(&mut self) -> PointerResponse {
        self.pointer_up()
    }

    /// Wheel zoom; `delta_y < 0` zooms in. Does not affect drags.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let changed = apply_wheel(&mut self.viewport, delta_y, self.config.zoom_intensity);
        self.dirty |= changed;
        changed
    }

    pub fn zoom_in(&mut self) {
        self.viewport.scale_zoom(self.config.zoom_button_factor);
        self.dirty = true;
    }

    pub fn zoom_out(&mut self) {
        self.viewport.scale_zoom(1.0 / self.config.zoom_button_factor);
        self.dirty = true;
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
        self.dirty = true;
    }

    /// Pans so the machine sits at the canvas centre at the current zoom.
    pub fn center_on_machine(&mut self, machine: Point) {
        self.viewport.center_on(machine);
        self.dirty = true;
    }

    pub fn cursor_hint(&self) -> CursorHint {
        if self.interaction.is_adjusting_heading() {
            CursorHint::Alias
        } else if self.interaction.is_hovering_handle() {
            CursorHint::Pointer
        } else if self.interaction.is_panning() {
            CursorHint::Grabbing
        } else {
            CursorHint::Grab
        }
    }

    /// Screen anchor for the handle tooltip; hidden during a heading drag.
    pub fn handle_tooltip(&self) -> Option<Point> {
        if self.interaction.is_hovering_handle() && !self.interaction.is_adjusting_heading() {
            self.interaction.handle_screen()
        } else {
            None
        }
    }

    pub fn status(&self, scene: &FieldScene<'_>) -> StatusReadout {
        StatusReadout {
            position: scene.machine,
            zoom: self.viewport.zoom(),
            pass: self.current_track_index(scene),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flags a redraw after host data changed (machine tick, new heading).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Draws a frame from the current state and clears the dirty flag.
    pub fn render(&mut self, scene: &FieldScene<'_>) -> RenderStats {
        let handle = self.handle_position(scene);
        if handle.is_none() && self.interaction.is_hovering_handle() {
            self.interaction.clear_hover();
        }

        self.dirty = false;
        let Some(pixmap) = self.pixmap.as_mut() else {
            return RenderStats::default();
        };

        let grid = scene
            .ab_line
            .map(|line| self.track_cache.get(line, scene.machine, &self.grid_params));
        let input = RenderInput {
            scene,
            viewport: &self.viewport,
            grid,
            handle,
            handle_radius_px: self.config.handle_radius_px,
            interaction: &self.interaction,
        };
        render_frame(pixmap, &input)
    }

    /// Renders only if something changed since the last frame.
    pub fn render_if_dirty(&mut self, scene: &FieldScene<'_>) -> Option<RenderStats> {
        if self.dirty {
            Some(self.render(scene))
        } else {
            None
        }
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Copies the last frame out as straight-alpha RGBA.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let Some(pixmap) = &self.pixmap else {
            return RgbaImage::new(0, 0);
        };
        let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguide_core::ABLine;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn line() -> ABLine {
        ABLine::new("ab", Point::ORIGIN, Point::new(0.0, -100.0), 0.0, 10.0)
    }

    #[test]
    fn test_new_canvas_is_dirty() {
        let canvas = FieldCanvas::new(100, 100);
        assert!(canvas.is_dirty());
        assert_eq!(canvas.mode(), DragMode::Idle);
    }

    #[test]
    fn test_render_clears_dirty() {
        let mut canvas = FieldCanvas::new(100, 100);
        let scene = FieldScene::new(Point::ORIGIN, 12.0);
        assert!(canvas.render_if_dirty(&scene).is_some());
        assert!(!canvas.is_dirty());
        assert!(canvas.render_if_dirty(&scene).is_none());
        canvas.wheel(-1.0);
        assert!(canvas.is_dirty());
    }

    #[test]
    fn test_heading_listener_receives_drag() {
        let l = line();
        let scene = FieldScene::new(Point::ORIGIN, 12.0).with_ab_line(&l);
        let mut canvas = FieldCanvas::new(200, 200);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        canvas.set_heading_listener(move |h| sink.borrow_mut().push(h));

        canvas.pointer_down(Point::new(100.0, 140.0), &scene);
        let resp = canvas.pointer_move(Point::new(150.0, 100.0), &scene);
        assert!(resp.needs_redraw);
        assert_eq!(seen.borrow().len(), 1);
        assert!((seen.borrow()[0] - 90.0).abs() < 1e-9);
        assert_eq!(canvas.cursor_hint(), CursorHint::Alias);
    }

    #[test]
    fn test_zero_zoom_minimum_falls_back_to_defaults() {
        let config = GuidanceConfig {
            zoom_min: 0.0,
            ..GuidanceConfig::default()
        };
        let mut canvas = FieldCanvas::with_config(100, 100, config);
        assert_eq!(canvas.config(), &GuidanceConfig::default());
        for _ in 0..20_000 {
            canvas.wheel(1.0);
        }
        assert_eq!(canvas.zoom(), 0.05);
        let world = canvas.viewport().client_to_world(Point::new(0.0, 0.0));
        assert!(world.is_finite());
    }

    #[test]
    fn test_nan_zoom_minimum_does_not_panic() {
        let config = GuidanceConfig {
            zoom_min: f64::NAN,
            ..GuidanceConfig::default()
        };
        let mut canvas = FieldCanvas::with_config(100, 100, config);
        assert_eq!(canvas.viewport().zoom_bounds(), (0.05, 50.0));
        canvas.wheel(-1.0);
        assert!((canvas.zoom() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_buttons_clamp() {
        let mut canvas = FieldCanvas::new(100, 100);
        canvas.zoom_in();
        assert!((canvas.zoom() - 1.5).abs() < 1e-12);
        canvas.zoom_out();
        canvas.zoom_out();
        assert!((canvas.zoom() - 1.0 / 1.5).abs() < 1e-12);
        for _ in 0..50 {
            canvas.zoom_in();
        }
        assert_eq!(canvas.zoom(), 50.0);
        canvas.reset_view();
        assert_eq!(canvas.zoom(), 1.0);
        assert_eq!(canvas.offset(), Point::ORIGIN);
    }

    #[test]
    fn test_center_on_machine() {
        let mut canvas = FieldCanvas::new(100, 100);
        canvas.zoom_in();
        canvas.center_on_machine(Point::new(10.0, -4.0));
        assert_eq!(canvas.offset(), Point::new(-15.0, 6.0));
    }

    #[test]
    fn test_status_display() {
        let l = line();
        let scene = FieldScene::new(Point::new(15.0, -2.26), 12.0).with_ab_line(&l);
        let canvas = FieldCanvas::new(100, 100);
        assert_eq!(
            canvas.status(&scene).to_string(),
            "POS: 15.0, -2.3 | ZOOM: 1.00x | PASS: 2"
        );
        let bare = FieldScene::new(Point::new(15.0, 0.0), 12.0);
        assert_eq!(canvas.status(&bare).pass, 0);
    }

    #[test]
    fn test_zero_size_surface_renders_nothing() {
        let mut canvas = FieldCanvas::new(0, 0);
        let scene = FieldScene::new(Point::ORIGIN, 12.0);
        assert_eq!(canvas.render(&scene), RenderStats::default());
        assert!(canvas.pixmap().is_none());
        assert_eq!(canvas.to_rgba_image().dimensions(), (0, 0));
        canvas.resize(10, 10);
        assert!(canvas.pixmap().is_some());
    }

    #[test]
    fn test_cursor_hints() {
        let l = line();
        let scene = FieldScene::new(Point::ORIGIN, 12.0).with_ab_line(&l);
        let mut canvas = FieldCanvas::new(200, 200);
        assert_eq!(canvas.cursor_hint(), CursorHint::Grab);
        canvas.pointer_move(Point::new(100.0, 140.0), &scene);
        assert_eq!(canvas.cursor_hint(), CursorHint::Pointer);
        assert_eq!(canvas.handle_tooltip(), Some(Point::new(100.0, 140.0)));
        canvas.pointer_move(Point::new(10.0, 10.0), &scene);
        canvas.pointer_down(Point::new(10.0, 10.0), &scene);
        assert_eq!(canvas.cursor_hint(), CursorHint::Grabbing);
        assert_eq!(CursorHint::Grabbing.as_str(), "grabbing");
    }
}
