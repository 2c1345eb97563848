//! Pointer interaction state machine.
//!
//! A drag is either a pan or a heading adjustment, never both; the variant
//! makes the illegal combination unrepresentable. Hover over the handle is
//! tracked separately and recomputed on every pointer move, whatever the
//! drag mode. All handlers run to completion synchronously.

use fieldguide_core::{heading_between, Point};
use tracing::{debug, trace};

use crate::handle::hit_test;
use crate::viewport::Viewport;

/// Current drag, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragMode {
    #[default]
    Idle,
    /// Dragging the view; `last` is the previous pointer position in
    /// canvas-local pixels.
    Panning { last: Point },
    /// Dragging the handle; pointer moves emit heading changes.
    AdjustingHeading,
}

impl DragMode {
    pub fn is_panning(&self) -> bool {
        matches!(self, DragMode::Panning { .. })
    }

    pub fn is_adjusting_heading(&self) -> bool {
        matches!(self, DragMode::AdjustingHeading)
    }
}

/// Per-event inputs the state machine reads but does not own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerContext {
    /// Handle world position; `None` without an AB-line.
    pub handle: Option<Point>,
    pub machine: Point,
    pub hit_radius_px: f64,
}

/// Result of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveOutcome {
    /// New heading to report to the host while adjusting.
    pub heading: Option<f64>,
    /// Something visible changed (hover, pan or heading).
    pub needs_redraw: bool,
}

/// Drag mode plus hover feedback.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: DragMode,
    hovering_handle: bool,
    handle_screen: Option<Point>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn is_panning(&self) -> bool {
        self.mode.is_panning()
    }

    pub fn is_adjusting_heading(&self) -> bool {
        self.mode.is_adjusting_heading()
    }

    pub fn is_hovering_handle(&self) -> bool {
        self.hovering_handle
    }

    /// Screen position of the handle, recorded while it is hovered or
    /// being dragged.
    pub fn handle_screen(&self) -> Option<Point> {
        self.handle_screen
    }

    /// Starts a heading drag if the pointer is on the handle, otherwise a
    /// pan. Ignored while a drag is already in progress. Returns whether
    /// the mode changed.
    pub fn pointer_down(
        &mut self,
        client: Point,
        viewport: &Viewport,
        ctx: &PointerContext,
    ) -> bool {
        if self.mode != DragMode::Idle {
            trace!("pointer down ignored during {:?}", self.mode);
            return false;
        }

        let world = viewport.client_to_world(client);
        match ctx.handle {
            Some(handle) if hit_test(handle, world, viewport, ctx.hit_radius_px) => {
                debug!("Entering AdjustingHeading at {}", world);
                self.mode = DragMode::AdjustingHeading;
                self.handle_screen = Some(viewport.world_to_screen(handle));
            }
            _ => {
                let last = viewport.client_to_screen(client);
                debug!("Entering Panning at {}", last);
                self.mode = DragMode::Panning { last };
            }
        }
        true
    }

    /// Recomputes hover, then applies the active drag.
    pub fn pointer_move(
        &mut self,
        client: Point,
        viewport: &mut Viewport,
        ctx: &PointerContext,
    ) -> MoveOutcome {
        let world = viewport.client_to_world(client);
        let mut outcome = MoveOutcome {
            needs_redraw: self.update_hover(world, viewport, ctx),
            ..MoveOutcome::default()
        };

        match self.mode {
            DragMode::AdjustingHeading => {
                // Zero displacement has no direction; keep the current heading
                if let Some(heading) = heading_between(ctx.machine, world) {
                    trace!("heading drag -> {:.2}", heading);
                    outcome.heading = Some(heading);
                    outcome.needs_redraw = true;
                }
            }
            DragMode::Panning { last } => {
                let current = viewport.client_to_screen(client);
                let delta = current - last;
                if delta != Point::ORIGIN {
                    viewport.pan_by(delta.x, delta.y);
                    outcome.needs_redraw = true;
                }
                self.mode = DragMode::Panning { last: current };
            }
            DragMode::Idle => {}
        }
        outcome
    }

    /// Ends any drag. Pointer-leave goes through here too, so a drag cannot
    /// outlive the pointer leaving the surface. Returns whether a drag
    /// ended.
    pub fn pointer_up(&mut self) -> bool {
        if self.mode == DragMode::Idle {
            return false;
        }
        debug!("Leaving {:?}", self.mode);
        self.mode = DragMode::Idle;
        if !self.hovering_handle {
            self.handle_screen = None;
        }
        true
    }

    /// Drops hover feedback, e.g. when the handle disappears.
    pub fn clear_hover(&mut self) {
        self.hovering_handle = false;
        if !self.mode.is_adjusting_heading() {
            self.handle_screen = None;
        }
    }

    fn update_hover(&mut self, world: Point, viewport: &Viewport, ctx: &PointerContext) -> bool {
        let before = (self.hovering_handle, self.handle_screen);

        let Some(handle) = ctx.handle else {
            self.hovering_handle = false;
            self.handle_screen = None;
            return before != (self.hovering_handle, self.handle_screen);
        };

        self.hovering_handle = hit_test(handle, world, viewport, ctx.hit_radius_px);
        self.handle_screen = if self.hovering_handle || self.mode.is_adjusting_heading() {
            Some(viewport.world_to_screen(handle))
        } else {
            None
        };
        trace!("hover handle: {}", self.hovering_handle);
        before != (self.hovering_handle, self.handle_screen)
    }
}

/// Applies one wheel notch: `delta_y < 0` zooms in, `delta_y > 0` zooms
/// out, zero does nothing. Returns whether the zoom changed.
pub fn apply_wheel(viewport: &mut Viewport, delta_y: f64, intensity: f64) -> bool {
    let factor = if delta_y < 0.0 {
        1.0 + intensity
    } else if delta_y > 0.0 {
        1.0 - intensity
    } else {
        return false;
    };
    let before = viewport.zoom();
    viewport.scale_zoom(factor);
    viewport.zoom() != before
}
