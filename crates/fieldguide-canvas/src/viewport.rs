//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between world coordinates (field space) and pixel
//! coordinates (screen space). World origin sits at the canvas centre,
//! shifted by the pan offset; both axes keep their orientation (no Y flip):
//!
//! ```text
//! screen_x = world_x * zoom + canvas_width / 2 + offset_x
//! screen_y = world_y * zoom + canvas_height / 2 + offset_y
//! ```
//!
//! Pointer events arrive in client coordinates; the surface origin (the
//! top-left of the drawing surface's bounding box) is subtracted first.

use std::fmt;

use fieldguide_core::{GuidanceConfig, Point};
use fieldguide_core::constants::{ZOOM_MAX, ZOOM_MIN};
use tracing::{debug, warn};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    surface_left: f64,
    surface_top: f64,
    zoom_min: f64,
    zoom_max: f64,
}

impl Viewport {
    /// Creates a viewport for a surface of the given size at 1:1 zoom.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            canvas_width,
            canvas_height,
            surface_left: 0.0,
            surface_top: 0.0,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
        }
    }

    /// Creates a viewport whose zoom bounds come from `config`.
    pub fn with_config(canvas_width: f64, canvas_height: f64, config: &GuidanceConfig) -> Self {
        let mut viewport = Self::new(canvas_width, canvas_height);
        viewport.set_zoom_bounds(config.zoom_min, config.zoom_max);
        viewport
    }

    /// Replaces the zoom bounds and re-clamps the current zoom.
    ///
    /// Zoom must stay strictly positive and finite, so a minimum that is
    /// not a positive finite number falls back to [`ZOOM_MIN`], and a
    /// maximum that is not finite or lies below the minimum falls back to
    /// [`ZOOM_MAX`] (raised to the minimum if needed).
    pub fn set_zoom_bounds(&mut self, min: f64, max: f64) {
        let min = if min.is_finite() && min > 0.0 {
            min
        } else {
            warn!("Ignoring zoom minimum {}; using {}", min, ZOOM_MIN);
            ZOOM_MIN
        };
        let max = if max.is_finite() && max >= min {
            max
        } else {
            let fallback = ZOOM_MAX.max(min);
            warn!("Ignoring zoom maximum {}; using {}", max, fallback);
            fallback
        };
        self.zoom_min = min;
        self.zoom_max = max;
        self.zoom = self.clamp(self.zoom);
    }

    /// Current `(min, max)` zoom bounds.
    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width.max(0.0);
        self.canvas_height = height.max(0.0);
    }

    /// Sets the client-space position of the surface's top-left corner.
    pub fn set_surface_origin(&mut self, left: f64, top: f64) {
        self.surface_left = left;
        self.surface_top = top;
    }

    /// Gets the client-space position of the surface's top-left corner.
    pub fn surface_origin(&self) -> Point {
        Point::new(self.surface_left, self.surface_top)
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = self.clamp(zoom);
        if clamped != self.zoom {
            debug!("zoom {:.3} -> {:.3}", self.zoom, clamped);
        }
        self.zoom = clamped;
    }

    /// Multiplies the zoom by `factor`, then clamps.
    pub fn scale_zoom(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.zoom_min;
        }
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    /// Gets the pan offset in pixels.
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Sets the pan offset.
    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Pans by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Screen position of the world origin.
    pub fn origin_on_screen(&self) -> Point {
        Point::new(
            self.canvas_width / 2.0 + self.offset_x,
            self.canvas_height / 2.0 + self.offset_y,
        )
    }

    /// Converts world coordinates to canvas-local pixel coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        let origin = self.origin_on_screen();
        Point::new(world.x * self.zoom + origin.x, world.y * self.zoom + origin.y)
    }

    /// Converts canvas-local pixel coordinates to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let origin = self.origin_on_screen();
        Point::new(
            (screen.x - origin.x) / self.zoom,
            (screen.y - origin.y) / self.zoom,
        )
    }

    /// Converts client (pointer event) coordinates to canvas-local ones.
    pub fn client_to_screen(&self, client: Point) -> Point {
        Point::new(client.x - self.surface_left, client.y - self.surface_top)
    }

    /// Converts client (pointer event) coordinates to world coordinates.
    pub fn client_to_world(&self, client: Point) -> Point {
        self.screen_to_world(self.client_to_screen(client))
    }

    /// Centers the viewport on a world coordinate.
    pub fn center_on(&mut self, world: Point) {
        self.offset_x = -world.x * self.zoom;
        self.offset_y = -world.y * self.zoom;
    }

    /// Resets viewport to default state (1:1 zoom, no pan).
    pub fn reset(&mut self) {
        self.zoom = self.clamp(1.0);
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_origin_maps_to_canvas_center() {
        let vp = Viewport::new(800.0, 600.0);
        let screen = vp.world_to_screen(Point::ORIGIN);
        assert_eq!(screen, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_world_to_screen_applies_zoom_and_offset() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(2.0);
        vp.set_offset(10.0, -20.0);
        let screen = vp.world_to_screen(Point::new(5.0, 5.0));
        assert_eq!(screen, Point::new(420.0, 290.0));
    }

    #[test]
    fn test_screen_to_world_inverts() {
        let mut vp = Viewport::new(640.0, 480.0);
        vp.set_zoom(3.5);
        vp.set_offset(-33.0, 12.5);
        let p = Point::new(-17.25, 42.0);
        let back = vp.screen_to_world(vp.world_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_client_coordinates_subtract_surface_origin() {
        let mut vp = Viewport::new(200.0, 100.0);
        vp.set_surface_origin(50.0, 30.0);
        // Client (150, 80) is local (100, 50): the canvas centre.
        assert_eq!(vp.client_to_world(Point::new(150.0, 80.0)), Point::ORIGIN);
    }

    #[test]
    fn test_zoom_clamped_not_rejected() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(1000.0);
        assert_eq!(vp.zoom(), 50.0);
        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), 0.05);
        vp.set_zoom(-4.0);
        assert_eq!(vp.zoom(), 0.05);
    }

    #[test]
    fn test_zoom_bounds_reject_non_positive_or_nan() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom_bounds(0.0, 10.0);
        assert_eq!(vp.zoom_bounds(), (0.05, 10.0));
        vp.set_zoom_bounds(f64::NAN, f64::NAN);
        assert_eq!(vp.zoom_bounds(), (0.05, 50.0));
        vp.set_zoom_bounds(-1.0, f64::INFINITY);
        assert_eq!(vp.zoom_bounds(), (0.05, 50.0));
        vp.set_zoom_bounds(100.0, 2.0);
        assert_eq!(vp.zoom_bounds(), (100.0, 100.0));
        assert_eq!(vp.zoom(), 100.0);
    }

    #[test]
    fn test_zoom_stays_positive_with_bad_minimum() {
        let mut vp = Viewport::new(200.0, 200.0);
        vp.set_zoom_bounds(0.0, 50.0);
        for _ in 0..20_000 {
            vp.scale_zoom(0.9);
        }
        assert_eq!(vp.zoom(), 0.05);
        let world = vp.screen_to_world(Point::new(0.0, 0.0));
        assert!(world.is_finite());
    }

    #[test]
    fn test_center_on_places_point_at_center() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(2.0);
        vp.center_on(Point::new(30.0, -10.0));
        let screen = vp.world_to_screen(Point::new(30.0, -10.0));
        assert_eq!(screen, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_reset() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(4.0);
        vp.pan_by(10.0, 10.0);
        vp.reset();
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), Point::ORIGIN);
    }

    #[test]
    fn test_display() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan_by(12.34, -5.0);
        assert_eq!(vp.to_string(), "Zoom: 1.00x | Pan: (12.3, -5.0)");
    }
}
