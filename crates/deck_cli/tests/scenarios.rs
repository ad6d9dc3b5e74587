//! Integration tests for headless scenario runs

use deck_card::{CardConfig, CardState};
use deck_cli::{run_loaded_scenario, run_scenario, ReportStatus, RunConfig, Scenario};

const EXPAND_AND_DISMISS: &str = r#"{
    "name": "expand and dismiss",
    "steps": [
        { "type": "touch_down", "x": 40, "y": 40 },
        { "type": "touch_up", "x": 40, "y": 40 },
        { "type": "assert_state", "state": "expanding" },
        { "type": "assert_presented", "value": false },
        { "type": "settle" },
        { "type": "assert_state", "state": "expanded" },
        { "type": "assert_presented", "value": true },
        { "type": "assert_frame", "x": 28.125, "y": 50, "width": 318.75, "height": 647 },
        { "type": "scroll", "offset_y": -100 },
        { "type": "scroll", "offset_y": -40 },
        { "type": "assert_frame", "x": 28.125, "y": 120, "width": 318.75, "height": 647 },
        { "type": "release", "velocity_y": -3 },
        { "type": "assert_state", "state": "collapsing" },
        { "type": "settle" },
        { "type": "assert_state", "state": "collapsed" },
        { "type": "assert_presented", "value": false },
        { "type": "assert_frame", "x": 10, "y": 10, "width": 100, "height": 140, "tolerance": 0 }
    ]
}"#;

#[test]
fn test_full_cycle_passes() {
    let outcome = run_scenario(EXPAND_AND_DISMISS).unwrap();
    let report = outcome.report();
    assert!(!outcome.is_failed(), "{}", report.render_text());
    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.final_state, CardState::Collapsed);
    assert!(!report.presented);
    assert!(report.elapsed_frames > 0);

    let names: Vec<&str> = report
        .trace
        .iter()
        .map(|entry| entry.notification.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "did_tap_inside",
            "will_show_detail",
            "is_showing_detail",
            "did_show_detail",
            "detail_is_scrolling",
            "will_close_detail",
            "is_hiding_detail",
            "did_close_detail",
        ]
    );
    assert_eq!(report.trace[4].count, 2);
    assert!(report.trace[2].count > 1);
}

#[test]
fn test_small_drag_settles_back() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "touch_down", "x": 40, "y": 40 },
                { "type": "touch_up", "x": 40, "y": 40 },
                { "type": "settle" },
                { "type": "scroll", "offset_y": -90 },
                { "type": "release", "velocity_y": -3 },
                { "type": "settle" },
                { "type": "assert_state", "state": "expanded" },
                { "type": "assert_frame", "x": 28.125, "y": 50, "width": 318.75, "height": 647 }
            ]
        }"#,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{}", outcome.report().render_text());
}

#[test]
fn test_failed_assertion_reports_step() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "tick", "frames": 3 },
                { "type": "assert_state", "state": "expanded" }
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(1));
    assert_eq!(report.assertion.as_deref(), Some("assert_state"));
    assert_eq!(
        report.message.as_deref(),
        Some("expected state expanded, found collapsed")
    );
    assert_eq!(report.elapsed_frames, 3);
    assert!(report.render_text().contains("FAILED at step 1"));
}

#[test]
fn test_custom_card_frame_and_config() {
    let scenario = Scenario::from_json(
        r#"{
            "card": { "x": 0, "y": 0, "width": 50, "height": 50 },
            "steps": [
                { "type": "touch_down", "x": 25, "y": 25 },
                { "type": "touch_up", "x": 25, "y": 25 },
                { "type": "settle" },
                { "type": "assert_frame", "x": 30, "y": 50, "width": 340, "height": 780 }
            ]
        }"#,
    )
    .unwrap();
    let config = CardConfig::from_toml_str("[screen]\nwidth = 400.0\nheight = 800.0\n").unwrap();

    let outcome = run_loaded_scenario(&scenario, config, RunConfig { frame_ms: 8 }).unwrap();
    assert!(!outcome.is_failed(), "{}", outcome.report().render_text());
}

#[test]
fn test_touch_outside_card_does_nothing() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "touch_down", "x": 300, "y": 300 },
                { "type": "touch_up", "x": 300, "y": 300 },
                { "type": "settle" },
                { "type": "assert_state", "state": "collapsed" }
            ]
        }"#,
    )
    .unwrap();
    assert!(!outcome.is_failed());
    assert!(outcome.report().trace.is_empty());
}

#[test]
fn test_json_report() {
    let outcome = run_scenario(r#"{ "steps": [ { "type": "tick", "frames": 1 } ] }"#).unwrap();
    let mut out = Vec::new();
    outcome.report().write_json(&mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["status"], "passed");
    assert_eq!(value["final_state"], "collapsed");
    assert_eq!(value["elapsed_ms"], 16.0);
}
