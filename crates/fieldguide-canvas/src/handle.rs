//! Heading-adjustment handle geometry.
//!
//! The handle sits on the machine's current track, `lookahead` world units
//! before the machine's projection onto that track (measured along the
//! travel direction), so for heading 0 it lies toward +Y of the machine.

use fieldguide_core::{travel_direction, ABLine, Point};

use crate::guidance::{current_track_index, track_origin};
use crate::viewport::Viewport;

/// World position of the handle, or `None` without an AB-line.
pub fn handle_position(line: Option<&ABLine>, machine: Point, lookahead: f64) -> Option<Point> {
    let line = line?;
    if !line.has_valid_spacing() {
        return None;
    }
    let index = current_track_index(line.heading, line.spacing, machine);
    let origin = track_origin(line.heading, line.spacing, index);
    let direction = travel_direction(line.heading);
    let t = (machine - origin).dot(&direction);
    Some(origin + direction * (t - lookahead))
}

/// Whether a world-space pointer is within `hit_radius_px` screen pixels of
/// the handle at the viewport's zoom.
pub fn hit_test(
    handle: Point,
    pointer_world: Point,
    viewport: &Viewport,
    hit_radius_px: f64,
) -> bool {
    handle.distance_to(&pointer_world) * viewport.zoom() < hit_radius_px
}
