//! Integration tests for the headless demo session.

use fieldguide::{run_demo, DemoOptions, DemoScenario, GuidanceConfig, Point};
use tempfile::tempdir;

#[test]
fn test_scenario_file_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("scenario.json");
    let scenario = DemoScenario::default();
    scenario.save_to_file(&path).expect("save");

    let raw = std::fs::read_to_string(&path).expect("read");
    assert!(raw.contains("\"abLine\""));
    assert!(raw.contains("\"areaHectares\""));

    let loaded = DemoScenario::load_from_file(&path).expect("load");
    assert_eq!(loaded, scenario);
}

#[test]
fn test_minimal_scenario_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("minimal.json");
    std::fs::write(&path, r#"{ "boundaries": [], "machineWidth": 6.0 }"#).expect("write");
    let loaded = DemoScenario::load_from_file(&path).expect("load");
    assert!(loaded.ab_line.is_none());
    assert_eq!(loaded.machine, Point::ORIGIN);
}

#[test]
fn test_bad_scenario_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").expect("write");
    assert!(DemoScenario::load_from_file(&path).is_err());
    assert!(DemoScenario::load_from_file(&dir.path().join("missing.json")).is_err());
}

#[test]
fn test_demo_holding_drag_renders_compass() {
    let options = DemoOptions {
        width: 240,
        height: 180,
        ticks: 10,
        drag_to_heading: Some(90.0),
        hold_drag: true,
    };
    let report =
        run_demo(DemoScenario::default(), GuidanceConfig::default(), &options).expect("demo");
    assert!(report.canvas.interaction().is_adjusting_heading());
    assert!(report.last_stats.compass);
    assert!(report.last_stats.handle);
    assert_eq!(report.last_stats.boundaries, 1);
    assert_eq!(report.canvas.to_rgba_image().dimensions(), (240, 180));
    assert!(report.frames >= 10);
}

#[test]
fn test_demo_png_export() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("frame.png");
    let options = DemoOptions {
        width: 64,
        height: 48,
        ticks: 0,
        drag_to_heading: None,
        hold_drag: false,
    };
    let report =
        run_demo(DemoScenario::default(), GuidanceConfig::default(), &options).expect("demo");
    report.canvas.to_rgba_image().save(&out).expect("save png");
    assert!(out.exists());
    assert_eq!(report.headings_reported, 0);
    assert_eq!(report.status.pass, 0);
}

#[test]
fn test_version_constants() {
    assert!(!fieldguide::VERSION.is_empty());
    assert!(!fieldguide::BUILD_DATE.is_empty());
}
