use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fieldguide::{init_logging, run_demo, DemoOptions, DemoScenario, GuidanceConfig};
use tracing::info;

/// Runs a scripted guidance session headlessly and writes the last frame.
#[derive(Parser, Debug)]
#[command(name = "fieldguide", version, about = "Headless field guidance canvas demo")]
struct Cli {
    /// Output PNG for the final frame.
    #[arg(long, short, default_value = "fieldguide.png")]
    output: PathBuf,

    /// Canvas configuration (.json or .toml).
    #[arg(long, env = "FIELDGUIDE_CONFIG")]
    config: Option<PathBuf>,

    /// Scenario file (JSON); the built-in demo field is used otherwise.
    #[arg(long)]
    scenario: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Simulator ticks (100 ms each) before the drag.
    #[arg(long, default_value_t = 50)]
    ticks: u32,

    /// Drag the heading handle toward this heading in degrees.
    #[arg(long, default_value_t = 45.0)]
    drag_to: f64,

    /// Skip the heading drag.
    #[arg(long, default_value_t = false)]
    no_drag: bool,

    /// Release the handle before the final frame (hides the compass).
    #[arg(long, default_value_t = false)]
    release: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    info!("FieldGuide {} (built {})", fieldguide::VERSION, fieldguide::BUILD_DATE);

    let config = match &cli.config {
        Some(path) => GuidanceConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GuidanceConfig::default(),
    };
    let scenario = match &cli.scenario {
        Some(path) => DemoScenario::load_from_file(path)?,
        None => DemoScenario::default(),
    };

    let options = DemoOptions {
        width: cli.width,
        height: cli.height,
        ticks: cli.ticks,
        drag_to_heading: (!cli.no_drag).then_some(cli.drag_to),
        hold_drag: !cli.release,
    };
    let report = run_demo(scenario, config, &options)?;

    report
        .canvas
        .to_rgba_image()
        .save(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    info!(
        "Wrote {} after {} frames ({} heading updates): {}",
        cli.output.display(),
        report.frames,
        report.headings_reported,
        report.status
    );
    Ok(())
}
