//! # FieldGuide
//!
//! Interactive field-guidance view for agricultural machinery: field
//! boundaries, a parallel-track guidance grid derived from an AB-line, a
//! simulated machine and a drag handle for setting the guidance heading.
//!
//! ## Architecture
//!
//! FieldGuide is organized as a workspace with multiple crates:
//!
//! 1. **fieldguide-core** - Field model, geometry helpers, configuration, errors, simulator
//! 2. **fieldguide-canvas** - Viewport, track grid, handle, interaction state machine, renderer
//! 3. **fieldguide** - This crate: re-exports, logging setup and the headless demo

pub mod demo;

pub use fieldguide_canvas;
pub use fieldguide_core;

pub use fieldguide_core::{
    heading_between, lateral_axis, normalize_heading, travel_direction, ABLine, ConfigError,
    Error, FieldBoundary, GuidanceConfig, MachineSimulator, Point, Result,
};

pub use fieldguide_canvas::{
    heading_label, CursorHint, DragMode, FieldCanvas, FieldScene, GuidanceGrid, PointerResponse,
    RenderStats, StatusReadout, Track, TrackClass, Viewport,
};

pub use demo::{run_demo, DemoOptions, DemoReport, DemoScenario};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
