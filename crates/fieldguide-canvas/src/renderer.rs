//! Frame renderer.
//!
//! Draws one frame into a tiny-skia pixmap. World-space geometry is drawn
//! through a single transform (`scale(zoom)` then translate to the canvas
//! centre plus pan offset), so stroke widths and dash lengths given in
//! screen pixels are divided by zoom. Layers, bottom to top:
//!
//! - boundaries (active one highlighted)
//! - guidance tracks
//! - compass HUD (only while adjusting heading)
//! - handle connector, glow and handle
//! - machine glyph with its implement bar
//!
//! Rendering is a pure function of its inputs; calling it twice with the
//! same inputs yields the same pixels.

use fieldguide_core::{FieldBoundary, Point};
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{
    Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::trace;

use crate::font_manager;
use crate::guidance::{GuidanceGrid, TrackClass};
use crate::interaction::InteractionState;
use crate::scene::FieldScene;
use crate::viewport::Viewport;

const HUD_TEXT_SIZE: f32 = 14.0;

fn bg_color() -> Color {
    Color::from_rgba8(9, 9, 11, 255)
}
fn amber() -> Color {
    Color::from_rgba8(251, 191, 36, 255)
}
fn machine_red() -> Color {
    Color::from_rgba8(239, 68, 68, 255)
}

fn rgba(r: u8, g: u8, b: u8, a: f32) -> Color {
    Color::from_rgba8(r, g, b, (a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Stroke of `width` screen pixels at `zoom`, optionally dashed with
/// on/off lengths in screen pixels.
fn stroke(width: f32, dash: Option<[f32; 2]>, zoom: f32) -> Stroke {
    Stroke {
        width: width / zoom,
        dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on / zoom, off / zoom], 0.0)),
        ..Default::default()
    }
}

fn line_path(a: Point, b: Point) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(a.x as f32, a.y as f32);
    pb.line_to(b.x as f32, b.y as f32);
    pb.finish()
}

/// Compass readout text for a heading.
pub fn heading_label(heading: f64) -> String {
    format!("{:.1}°", heading)
}

/// Inputs of one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub scene: &'a FieldScene<'a>,
    pub viewport: &'a Viewport,
    /// Tracks for the scene's AB-line, if it has one.
    pub grid: Option<&'a GuidanceGrid>,
    pub handle: Option<Point>,
    /// Drawn handle radius in screen pixels.
    pub handle_radius_px: f64,
    pub interaction: &'a InteractionState,
}

/// What a frame ended up drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub boundaries: usize,
    pub tracks: usize,
    pub compass: bool,
    pub handle: bool,
    pub text: bool,
}

/// Draws a complete frame, replacing the pixmap's previous contents.
pub fn render_frame(pixmap: &mut Pixmap, input: &RenderInput<'_>) -> RenderStats {
    pixmap.fill(bg_color());

    let viewport = input.viewport;
    let zoom = viewport.zoom() as f32;
    let origin = viewport.origin_on_screen();
    let world = Transform::from_scale(zoom, zoom).post_translate(origin.x as f32, origin.y as f32);
    let adjusting = input.interaction.is_adjusting_heading();
    let mut stats = RenderStats::default();

    for (boundary, active) in input.scene.drawable_boundaries() {
        if draw_boundary(pixmap, boundary, active, zoom, world) {
            stats.boundaries += 1;
        }
    }

    if let (Some(line), Some(grid)) = (input.scene.ab_line, input.grid) {
        stats.tracks = draw_tracks(pixmap, grid, viewport, adjusting, world);

        if adjusting {
            stats.text = draw_compass(pixmap, input.scene.machine, line.heading, viewport, world);
            stats.compass = true;
        }

        if let Some(handle) = input.handle {
            draw_handle(pixmap, handle, input, zoom, world);
            stats.handle = true;
        }
    }

    draw_machine(pixmap, input.scene, zoom, world);

    trace!(
        "Rendered frame: {} boundaries, {} tracks, handle {}",
        stats.boundaries,
        stats.tracks,
        stats.handle
    );
    stats
}

fn draw_boundary(
    pixmap: &mut Pixmap,
    boundary: &FieldBoundary,
    active: bool,
    zoom: f32,
    transform: Transform,
) -> bool {
    let points = &boundary.points;
    if points.len() < 2 {
        return false;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x as f32, points[0].y as f32);
    for p in &points[1..] {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if points.len() >= 3 {
        pb.close();
    }
    let Some(path) = pb.finish() else {
        return false;
    };

    let (fill, outline, width) = if active {
        (rgba(34, 197, 94, 0.05), Color::from_rgba8(34, 197, 94, 255), 1.5)
    } else {
        (rgba(161, 161, 170, 0.03), rgba(113, 113, 122, 0.4), 1.0)
    };

    if points.len() >= 3 {
        pixmap.fill_path(&path, &paint(fill), FillRule::Winding, transform, None);
    }
    pixmap.stroke_path(&path, &paint(outline), &stroke(width, None, zoom), transform, None);
    true
}

fn draw_tracks(
    pixmap: &mut Pixmap,
    grid: &GuidanceGrid,
    viewport: &Viewport,
    adjusting: bool,
    transform: Transform,
) -> usize {
    let zoom = viewport.zoom() as f32;
    let (min, max) = visible_world_bounds(viewport);
    let mut drawn = 0;

    for track in grid.tracks() {
        // Dash segment count grows with zoom; only stroke the visible part
        let Some((a, b)) = clip_segment(track.start, track.end, min, max) else {
            continue;
        };
        let Some(path) = line_path(a, b) else {
            continue;
        };

        let (color, line) = match track.class {
            TrackClass::Active if adjusting => (amber(), stroke(5.0, None, zoom)),
            TrackClass::Active => (rgba(59, 130, 246, 0.9), stroke(3.0, None, zoom)),
            TrackClass::NextUp => (rgba(34, 197, 94, 0.6), stroke(2.0, Some([15.0, 10.0]), zoom)),
            TrackClass::Background => {
                (rgba(255, 255, 255, 0.08), stroke(1.0, Some([5.0, 20.0]), zoom))
            }
        };
        pixmap.stroke_path(&path, &paint(color), &line, transform, None);
        drawn += 1;
    }
    drawn
}

/// World-space rectangle covering the surface plus a small margin.
fn visible_world_bounds(viewport: &Viewport) -> (Point, Point) {
    let margin = 20.0;
    let top_left = viewport.screen_to_world(Point::new(-margin, -margin));
    let bottom_right = viewport.screen_to_world(Point::new(
        viewport.canvas_width() + margin,
        viewport.canvas_height() + margin,
    ));
    (top_left, bottom_right)
}

/// Clips segment `a`-`b` to the axis-aligned box `min`..`max`
/// (Liang-Barsky). Returns `None` when nothing remains.
fn clip_segment(a: Point, b: Point, min: Point, max: Point) -> Option<(Point, Point)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

fn draw_compass(
    pixmap: &mut Pixmap,
    machine: Point,
    heading: f64,
    viewport: &Viewport,
    transform: Transform,
) -> bool {
    let zoom = viewport.zoom() as f32;
    let z = f64::from(zoom);

    if let Some(ring) = PathBuilder::from_circle(machine.x as f32, machine.y as f32, 45.0 / zoom) {
        pixmap.stroke_path(
            &ring,
            &paint(rgba(251, 191, 36, 0.2)),
            &stroke(10.0, None, zoom),
            transform,
            None,
        );
    }

    for deg in (0..360).step_by(15) {
        let dir = fieldguide_core::travel_direction(f64::from(deg));
        let inner = machine + dir * (40.0 / z);
        let outer = machine + dir * (50.0 / z);
        let Some(path) = line_path(inner, outer) else {
            continue;
        };
        let (color, width) = if deg % 90 == 0 {
            (amber(), 2.0)
        } else {
            (rgba(251, 191, 36, 0.4), 1.0)
        };
        pixmap.stroke_path(&path, &paint(color), &stroke(width, None, zoom), transform, None);
    }

    let Some(font) = font_manager::hud_font() else {
        return false;
    };
    let anchor = viewport.world_to_screen(machine + Point::new(0.0, -65.0 / z));
    draw_text_centered(pixmap, font, &heading_label(heading), anchor, amber());
    true
}

fn draw_handle(
    pixmap: &mut Pixmap,
    handle: Point,
    input: &RenderInput<'_>,
    zoom: f32,
    transform: Transform,
) {
    let adjusting = input.interaction.is_adjusting_heading();
    let hovered = input.interaction.is_hovering_handle();
    let machine = input.scene.machine;
    let (hx, hy) = (handle.x as f32, handle.y as f32);
    let radius = input.handle_radius_px as f32;

    // Connector first so the handle covers its end
    if let Some(path) = line_path(machine, handle) {
        let color = if adjusting {
            rgba(251, 191, 36, 0.3)
        } else {
            rgba(255, 255, 255, 0.2)
        };
        pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke(1.0, Some([4.0, 4.0]), zoom),
            transform,
            None,
        );
    }

    if hovered || adjusting {
        if let Some(glow) = PathBuilder::from_circle(hx, hy, (radius + 4.0) / zoom) {
            let color = if adjusting {
                rgba(251, 191, 36, 0.4)
            } else {
                rgba(59, 130, 246, 0.4)
            };
            pixmap.stroke_path(&glow, &paint(color), &stroke(4.0, None, zoom), transform, None);
        }
    }

    if let Some(knob) = PathBuilder::from_circle(hx, hy, radius / zoom) {
        let fill = if adjusting {
            amber()
        } else if hovered {
            Color::from_rgba8(96, 165, 250, 255)
        } else {
            Color::from_rgba8(59, 130, 246, 255)
        };
        pixmap.fill_path(&knob, &paint(fill), FillRule::Winding, transform, None);
        pixmap.stroke_path(
            &knob,
            &paint(Color::WHITE),
            &stroke(2.0, None, zoom),
            transform,
            None,
        );
    }
}

fn draw_machine(pixmap: &mut Pixmap, scene: &FieldScene<'_>, zoom: f32, world: Transform) {
    let machine = scene.machine;
    let mut transform =
        world.pre_concat(Transform::from_translate(machine.x as f32, machine.y as f32));
    if let Some(line) = scene.ab_line {
        transform = transform.pre_concat(Transform::from_rotate(line.heading as f32));
    }

    if let Some(body) = Rect::from_xywh(-3.0 / zoom, -5.0 / zoom, 6.0 / zoom, 10.0 / zoom) {
        pixmap.fill_rect(body, &paint(machine_red()), transform, None);
    }

    // Implement bar goes over the body
    let width = scene.machine_width as f32;
    if width > 0.0 {
        if let Some(rect) = Rect::from_xywh(-width / 2.0, 2.0 / zoom, width, 2.0 / zoom) {
            let path = PathBuilder::from_rect(rect);
            pixmap.fill_path(
                &path,
                &paint(rgba(239, 68, 68, 0.3)),
                FillRule::Winding,
                transform,
                None,
            );
            pixmap.stroke_path(
                &path,
                &paint(machine_red()),
                &stroke(1.0, None, zoom),
                transform,
                None,
            );
        }
    }

    let z = f64::from(zoom);
    if let Some(tick) = line_path(Point::new(0.0, -5.0 / z), Point::new(0.0, -9.0 / z)) {
        pixmap.stroke_path(
            &tick,
            &paint(Color::WHITE),
            &stroke(2.0, None, zoom),
            transform,
            None,
        );
    }
}

/// Rasterizes `text` centred horizontally on `anchor` (screen pixels),
/// with its baseline at `anchor.y`, blending source-over.
fn draw_text_centered(
    pixmap: &mut Pixmap,
    font: &Font<'static>,
    text: &str,
    anchor: Point,
    color: Color,
) {
    let scale = Scale::uniform(HUD_TEXT_SIZE);
    let width: f32 = font
        .layout(text, scale, rt_point(0.0, 0.0))
        .filter_map(|g| g.pixel_bounding_box().map(|bb| bb.max.x as f32))
        .fold(0.0, f32::max);
    let start = rt_point(anchor.x as f32 - width / 2.0, anchor.y as f32);

    let (pw, ph) = (pixmap.width() as i32, pixmap.height() as i32);
    let stride = pixmap.width() as usize;
    let data = pixmap.data_mut();

    for glyph in font.layout(text, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 || px >= pw || py >= ph {
                return;
            }
            let a = coverage * color.alpha();
            if a <= 0.0 {
                return;
            }
            let idx = (py as usize * stride + px as usize) * 4;
            let pixel = &mut data[idx..idx + 4];
            let src = [color.red() * a, color.green() * a, color.blue() * a, a];
            for (channel, s) in pixel.iter_mut().zip(src) {
                let d = f32::from(*channel) / 255.0;
                *channel = ((s + d * (1.0 - a)) * 255.0).round().clamp(0.0, 255.0) as u8;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_label() {
        assert_eq!(heading_label(15.0), "15.0°");
        assert_eq!(heading_label(359.96), "360.0°");
        assert_eq!(heading_label(7.24), "7.2°");
    }

    #[test]
    fn test_clip_segment_inside_untouched() {
        let (a, b) = clip_segment(
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        )
        .expect("visible");
        assert_eq!(a, Point::new(1.0, 1.0));
        assert_eq!(b, Point::new(2.0, 2.0));
    }

    #[test]
    fn test_clip_segment_crossing() {
        let (a, b) = clip_segment(
            Point::new(5.0, -3000.0),
            Point::new(5.0, 3000.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        )
        .expect("visible");
        assert!((a.y - 0.0).abs() < 1e-9);
        assert!((b.y - 10.0).abs() < 1e-9);
        assert_eq!(a.x, 5.0);
    }

    #[test]
    fn test_clip_segment_outside() {
        assert!(clip_segment(
            Point::new(20.0, -3000.0),
            Point::new(20.0, 3000.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        )
        .is_none());
    }

    #[test]
    fn test_degenerate_boundaries_are_skipped() {
        let mut pixmap = Pixmap::new(10, 10).expect("pixmap");
        let empty = FieldBoundary::new("empty", vec![], 0.0);
        let single = FieldBoundary::new("single", vec![Point::ORIGIN], 0.0);
        let segment = FieldBoundary::new("seg", vec![Point::ORIGIN, Point::new(3.0, 3.0)], 0.0);
        let t = Transform::identity();
        assert!(!draw_boundary(&mut pixmap, &empty, true, 1.0, t));
        assert!(!draw_boundary(&mut pixmap, &single, true, 1.0, t));
        assert!(draw_boundary(&mut pixmap, &segment, false, 1.0, t));
    }
}
