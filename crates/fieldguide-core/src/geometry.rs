//! Planar geometry primitives shared by the field model and the canvas.
//!
//! World space is the field's own frame: X grows to the right and Y grows
//! downward, matching screen space before zoom and pan are applied. A
//! heading of 0° therefore points toward negative Y (up on screen) and
//! headings increase clockwise.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 2D coordinate. Unit-agnostic; meters in practice for world points and
/// pixels for screen points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}, {:.1}", self.x, self.y)
    }
}

/// Wraps any finite heading into `[0, 360)`.
///
/// Non-finite input collapses to 0 so a corrupt value can never leak into
/// the trigonometry downstream.
pub fn normalize_heading(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector along the direction of travel for `heading_deg`.
///
/// `(sin h, -cos h)`: heading 0 travels toward negative Y.
pub fn travel_direction(heading_deg: f64) -> Point {
    let rad = heading_deg.to_radians();
    Point::new(rad.sin(), -rad.cos())
}

/// Unit vector perpendicular to travel, used to measure lateral offset
/// between parallel tracks: `(cos h, sin h)`.
pub fn lateral_axis(heading_deg: f64) -> Point {
    let rad = heading_deg.to_radians();
    Point::new(rad.cos(), rad.sin())
}

/// Heading (degrees, `[0, 360)`) of the vector from `from` to `to`.
///
/// Returns `None` when the two points coincide, since a zero-length vector
/// has no direction.
pub fn heading_between(from: Point, to: Point) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize_heading(dx.atan2(-dy).to_degrees()))
}
