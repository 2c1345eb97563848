//! # FieldGuide Core
//!
//! Core types and utilities for FieldGuide.
//! Provides the field model (boundaries, AB-lines), planar geometry helpers,
//! the canvas configuration and error types, and a synthetic machine
//! simulator used to drive demos.

pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod simulation;
pub mod types;

pub use config::GuidanceConfig;
pub use error::{ConfigError, Error, Result};
pub use field::{ABLine, FieldBoundary};
pub use geometry::{heading_between, lateral_axis, normalize_heading, travel_direction, Point};
pub use simulation::MachineSimulator;
pub use types::{DataCallback, HeadingCallback};
