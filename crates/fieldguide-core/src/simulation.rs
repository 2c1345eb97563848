//! Synthetic machine motion for demos and tests.
//!
//! Real positioning comes from the host. This simulator stands in for it:
//! every tick it eases the speed toward its target and advances the
//! machine along the current travel direction.

use crate::geometry::{travel_direction, Point};
use tracing::trace;

/// Fraction of the remaining speed gap closed per tick.
const SPEED_EASING: f64 = 0.08;
/// World units travelled per tick per km/h of speed.
const DISTANCE_PER_SPEED_TICK: f64 = 0.01;
/// Below this a stopping machine snaps to rest.
const REST_THRESHOLD: f64 = 0.1;

/// Default cruise speed while working, km/h.
pub const DEFAULT_TARGET_SPEED: f64 = 8.5;

#[derive(Debug, Clone, PartialEq)]
pub struct MachineSimulator {
    position: Point,
    speed: f64,
    target_speed: f64,
    working: bool,
}

impl MachineSimulator {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            speed: 0.0,
            target_speed: DEFAULT_TARGET_SPEED,
            working: false,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_working(&self) -> bool {
        self.working
    }

    pub fn set_working(&mut self, working: bool) {
        self.working = working;
    }

    /// Advance one tick travelling along `heading_deg`.
    pub fn tick(&mut self, heading_deg: f64) -> Point {
        let target = if self.working { self.target_speed } else { 0.0 };
        self.speed += (target - self.speed) * SPEED_EASING;
        if target == 0.0 && self.speed < REST_THRESHOLD {
            self.speed = 0.0;
        }

        if self.speed > 0.0 {
            let step = travel_direction(heading_deg) * (self.speed * DISTANCE_PER_SPEED_TICK);
            self.position = self.position + step;
            trace!(
                "machine tick: speed {:.2}, pos ({})",
                self.speed,
                self.position
            );
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_machine_stays_put() {
        let mut sim = MachineSimulator::new(Point::new(1.0, 2.0));
        for _ in 0..10 {
            sim.tick(45.0);
        }
        assert_eq!(sim.position(), Point::new(1.0, 2.0));
        assert_eq!(sim.speed(), 0.0);
    }

    #[test]
    fn test_working_machine_moves_along_heading() {
        let mut sim = MachineSimulator::new(Point::ORIGIN);
        sim.set_working(true);
        for _ in 0..50 {
            sim.tick(0.0);
        }
        let pos = sim.position();
        assert!(pos.x.abs() < 1e-9);
        assert!(pos.y < 0.0, "heading 0 travels toward -Y, got {pos:?}");
        assert!(sim.speed() > 0.0 && sim.speed() < DEFAULT_TARGET_SPEED);
    }

    #[test]
    fn test_stopping_machine_comes_to_rest() {
        let mut sim = MachineSimulator::new(Point::ORIGIN);
        sim.set_working(true);
        for _ in 0..100 {
            sim.tick(90.0);
        }
        sim.set_working(false);
        for _ in 0..200 {
            sim.tick(90.0);
        }
        assert_eq!(sim.speed(), 0.0);
        let rested = sim.position();
        sim.tick(90.0);
        assert_eq!(sim.position(), rested);
        assert!(rested.x > 0.0);
    }
}
