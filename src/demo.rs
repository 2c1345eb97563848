//! Headless demo session.
//!
//! Stands in for the host application: owns the field data, ticks the
//! machine simulator, feeds scripted pointer events into a [`FieldCanvas`]
//! and applies the heading changes it reports.

use std::cell::Cell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use fieldguide_canvas::{FieldCanvas, FieldScene, RenderStats, StatusReadout};
use fieldguide_core::{
    travel_direction, ABLine, FieldBoundary, GuidanceConfig, MachineSimulator, Point,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Host-side field data for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoScenario {
    pub boundaries: Vec<FieldBoundary>,
    #[serde(default)]
    pub active_boundary_id: Option<String>,
    #[serde(default)]
    pub visible_boundary_ids: HashSet<String>,
    #[serde(default)]
    pub ab_line: Option<ABLine>,
    #[serde(default)]
    pub machine: Point,
    pub machine_width: f64,
}

impl Default for DemoScenario {
    fn default() -> Self {
        let boundary = FieldBoundary::new(
            "Talhão 04",
            vec![
                Point::new(-200.0, -150.0),
                Point::new(250.0, -120.0),
                Point::new(280.0, 180.0),
                Point::new(-180.0, 160.0),
            ],
            124.5,
        )
        .with_id("field-001")
        .with_farm_name("Fazenda Boa Esperança");

        Self {
            active_boundary_id: Some(boundary.id.clone()),
            boundaries: vec![boundary],
            visible_boundary_ids: HashSet::new(),
            ab_line: Some(ABLine::new(
                "ab-primary",
                Point::new(-200.0, -150.0),
                Point::new(250.0, -120.0),
                15.0,
                12.0,
            )),
            machine: Point::ORIGIN,
            machine_width: 12.0,
        }
    }
}

impl DemoScenario {
    /// Reads a scenario from a JSON file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario = serde_json::from_str(&content)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        Ok(scenario)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing scenario {}", path.display()))?;
        Ok(())
    }

    /// Borrowed snapshot handed to the canvas.
    pub fn scene(&self) -> FieldScene<'_> {
        let mut scene = FieldScene::new(self.machine, self.machine_width)
            .with_boundaries(&self.boundaries)
            .with_visible_boundaries(&self.visible_boundary_ids);
        if let Some(id) = &self.active_boundary_id {
            scene = scene.with_active_boundary(id);
        }
        if let Some(line) = &self.ab_line {
            scene = scene.with_ab_line(line);
        }
        scene
    }

    pub fn heading(&self) -> Option<f64> {
        self.ab_line.as_ref().map(|line| line.heading)
    }
}

/// Scripted session parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoOptions {
    pub width: u32,
    pub height: u32,
    /// Simulator ticks run with the machine working.
    pub ticks: u32,
    /// Drag the handle toward this heading, if set.
    pub drag_to_heading: Option<f64>,
    /// Render the last frame with the drag still held (shows the compass).
    pub hold_drag: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            ticks: 50,
            drag_to_heading: Some(45.0),
            hold_drag: true,
        }
    }
}

/// Outcome of a demo session.
#[derive(Debug)]
pub struct DemoReport {
    pub canvas: FieldCanvas,
    pub scenario: DemoScenario,
    pub frames: usize,
    pub headings_reported: usize,
    pub status: StatusReadout,
    pub last_stats: RenderStats,
}

/// Runs a scripted session: machine ticks, hover, optional heading drag.
pub fn run_demo(
    mut scenario: DemoScenario,
    config: GuidanceConfig,
    options: &DemoOptions,
) -> anyhow::Result<DemoReport> {
    let mut canvas = FieldCanvas::with_config(options.width, options.height, config);
    let reported = Rc::new(Cell::new(None::<f64>));
    let reported_count = Rc::new(Cell::new(0usize));
    {
        let reported = reported.clone();
        let count = reported_count.clone();
        canvas.set_heading_listener(move |h| {
            reported.set(Some(h));
            count.set(count.get() + 1);
        });
    }

    canvas.center_on_machine(scenario.machine);
    let mut frames = 0;

    let mut sim = MachineSimulator::new(scenario.machine);
    sim.set_working(options.ticks > 0);
    for _ in 0..options.ticks {
        scenario.machine = sim.tick(scenario.heading().unwrap_or(0.0));
        canvas.mark_dirty();
        if canvas.render_if_dirty(&scenario.scene()).is_some() {
            frames += 1;
        }
    }
    info!(
        "Simulated {} ticks, machine at ({}), speed {:.2}",
        options.ticks,
        scenario.machine,
        sim.speed()
    );

    if let Some(target) = options.drag_to_heading {
        let handle = canvas
            .handle_position(&scenario.scene())
            .context("scenario has no AB-line to drag")?;

        let handle_screen = canvas.viewport().world_to_screen(handle);
        let surface = canvas.viewport().surface_origin();
        let client = |p: Point| p + surface;

        canvas.pointer_move(client(handle_screen), &scenario.scene());
        canvas.pointer_down(client(handle_screen), &scenario.scene());

        // Sweep in a few steps the way a real drag arrives
        let start = scenario.heading().unwrap_or(0.0);
        for step in 1..=4 {
            let heading = start + (target - start) * f64::from(step) / 4.0;
            let world = scenario.machine + travel_direction(heading) * 60.0;
            let pointer = client(canvas.viewport().world_to_screen(world));
            canvas.pointer_move(pointer, &scenario.scene());

            if let (Some(h), Some(line)) = (reported.take(), scenario.ab_line.as_mut()) {
                line.set_heading(h);
                canvas.mark_dirty();
            }
            if canvas.render_if_dirty(&scenario.scene()).is_some() {
                frames += 1;
            }
        }
        debug!("Drag finished at heading {:?}", scenario.heading());

        if !options.hold_drag {
            canvas.pointer_up();
        }
    }

    let last_stats = canvas.render(&scenario.scene());
    frames += 1;
    let status = canvas.status(&scenario.scene());
    info!("{}", status);

    Ok(DemoReport {
        canvas,
        headings_reported: reported_count.get(),
        scenario,
        frames,
        status,
        last_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_matches_field_004() {
        let s = DemoScenario::default();
        assert_eq!(s.boundaries.len(), 1);
        assert_eq!(s.active_boundary_id.as_deref(), Some("field-001"));
        assert_eq!(s.heading(), Some(15.0));
        assert_eq!(s.scene().drawable_boundaries().count(), 1);
    }

    #[test]
    fn test_demo_drag_reaches_target_heading() {
        let options = DemoOptions {
            width: 320,
            height: 240,
            ticks: 5,
            drag_to_heading: Some(60.0),
            hold_drag: false,
        };
        let report = run_demo(DemoScenario::default(), GuidanceConfig::default(), &options)
            .expect("demo runs");
        let heading = report.scenario.heading().expect("heading");
        assert!((heading - 60.0).abs() < 1e-6, "heading {}", heading);
        assert_eq!(report.headings_reported, 4);
        assert!(!report.canvas.interaction().is_adjusting_heading());
    }

    #[test]
    fn test_demo_without_line_cannot_drag() {
        let scenario = DemoScenario {
            ab_line: None,
            ..DemoScenario::default()
        };
        let options = DemoOptions {
            ticks: 0,
            ..DemoOptions::default()
        };
        assert!(run_demo(scenario, GuidanceConfig::default(), &options).is_err());
    }
}
