//! Field model: boundaries and AB-line guidance references.
//!
//! These are host-owned snapshots. The canvas reads them every frame and
//! never mutates them; heading edits travel back to the host as events.

use crate::geometry::{normalize_heading, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A field outline. `points` describe an implicitly closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldBoundary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    pub points: Vec<Point>,
    pub area_hectares: f64,
}

impl FieldBoundary {
    /// Creates a boundary with a freshly generated `field-<uuid>` id.
    pub fn new(name: impl Into<String>, points: Vec<Point>, area_hectares: f64) -> Self {
        Self {
            id: format!("field-{}", Uuid::new_v4()),
            name: name.into(),
            farm_name: None,
            points,
            area_hectares,
        }
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_farm_name(mut self, farm_name: impl Into<String>) -> Self {
        self.farm_name = Some(farm_name.into());
        self
    }

    /// A closed shape needs at least three vertices. Fewer are still legal
    /// input; they just render as a segment or nothing at all.
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= 3
    }
}

/// A reference heading plus spacing defining a family of parallel passes.
///
/// `spacing` must be strictly positive. This is an input contract of the
/// host and is not validated here; see [`ABLine::has_valid_spacing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ABLine {
    pub id: String,
    /// Informational reference point; rendering math does not use it.
    pub p1: Point,
    /// Informational reference point; rendering math does not use it.
    pub p2: Point,
    /// Degrees clockwise from negative Y, kept in `[0, 360)`.
    pub heading: f64,
    /// Meters between adjacent tracks.
    pub spacing: f64,
}

impl ABLine {
    pub fn new(id: impl Into<String>, p1: Point, p2: Point, heading: f64, spacing: f64) -> Self {
        Self {
            id: id.into(),
            p1,
            p2,
            heading: normalize_heading(heading),
            spacing,
        }
    }

    /// Sets the heading, wrapping it into `[0, 360)`.
    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize_heading(degrees);
    }

    /// Returns a copy with the heading replaced (normalized).
    pub fn with_heading(&self, degrees: f64) -> Self {
        let mut line = self.clone();
        line.set_heading(degrees);
        line
    }

    /// Whether the host honored the spacing contract (finite and > 0).
    pub fn has_valid_spacing(&self) -> bool {
        self.spacing.is_finite() && self.spacing > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_generated_id_prefix() {
        let b = FieldBoundary::new("North", vec![], 0.0);
        assert!(b.id.starts_with("field-"));
        assert!(!b.is_polygon());
        let other = FieldBoundary::new("North", vec![], 0.0);
        assert_ne!(b.id, other.id);
    }

    #[test]
    fn test_boundary_json_uses_host_field_names() {
        let b = FieldBoundary::new(
            "Talhão 04",
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            124.5,
        )
        .with_id("field-001")
        .with_farm_name("Fazenda Boa Esperança");
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"farmName\""));
        assert!(json.contains("\"areaHectares\""));
        let back: FieldBoundary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert!(back.is_polygon());
    }

    #[test]
    fn test_abline_heading_normalized_on_construction_and_update() {
        let mut line = ABLine::new("ab", Point::ORIGIN, Point::ORIGIN, -15.0, 12.0);
        assert!((line.heading - 345.0).abs() < 1e-9);
        line.set_heading(720.0);
        assert_eq!(line.heading, 0.0);
        let turned = line.with_heading(450.0);
        assert!((turned.heading - 90.0).abs() < 1e-9);
        assert_eq!(line.heading, 0.0);
    }

    #[test]
    fn test_abline_spacing_contract() {
        let mut line = ABLine::new("ab", Point::ORIGIN, Point::ORIGIN, 0.0, 12.0);
        assert!(line.has_valid_spacing());
        line.spacing = 0.0;
        assert!(!line.has_valid_spacing());
        line.spacing = -3.0;
        assert!(!line.has_valid_spacing());
    }
}
