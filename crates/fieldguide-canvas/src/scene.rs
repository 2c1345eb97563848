//! Host-supplied snapshot for one render or event.

use std::collections::HashSet;

use fieldguide_core::{ABLine, FieldBoundary, Point};

/// Everything the canvas reads but does not own.
#[derive(Debug, Clone, Copy)]
pub struct FieldScene<'a> {
    pub boundaries: &'a [FieldBoundary],
    pub active_boundary_id: Option<&'a str>,
    pub visible_boundary_ids: Option<&'a HashSet<String>>,
    pub ab_line: Option<&'a ABLine>,
    pub machine: Point,
    /// Working implement width in world units.
    pub machine_width: f64,
}

impl<'a> FieldScene<'a> {
    pub fn new(machine: Point, machine_width: f64) -> Self {
        Self {
            boundaries: &[],
            active_boundary_id: None,
            visible_boundary_ids: None,
            ab_line: None,
            machine,
            machine_width,
        }
    }

    pub fn with_boundaries(mut self, boundaries: &'a [FieldBoundary]) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn with_active_boundary(mut self, id: &'a str) -> Self {
        self.active_boundary_id = Some(id);
        self
    }

    pub fn with_visible_boundaries(mut self, ids: &'a HashSet<String>) -> Self {
        self.visible_boundary_ids = Some(ids);
        self
    }

    pub fn with_ab_line(mut self, line: &'a ABLine) -> Self {
        self.ab_line = Some(line);
        self
    }

    pub fn is_active(&self, boundary: &FieldBoundary) -> bool {
        self.active_boundary_id == Some(boundary.id.as_str())
    }

    pub fn is_visible(&self, boundary: &FieldBoundary) -> bool {
        self.is_active(boundary)
            || self
                .visible_boundary_ids
                .is_some_and(|ids| ids.contains(&boundary.id))
    }

    /// Boundaries to draw, in host order, paired with their active flag.
    pub fn drawable_boundaries(&self) -> impl Iterator<Item = (&'a FieldBoundary, bool)> + 'a {
        let scene = *self;
        scene
            .boundaries
            .iter()
            .filter(move |b| scene.is_visible(b))
            .map(move |b| (b, scene.is_active(b)))
    }
}
