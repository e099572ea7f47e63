#![allow(clippy::float_cmp)]

use super::*;
use mask_canvas::codec;

fn run(script: &str) -> Replay {
    replay(script.as_bytes(), EditorConfig::default()).unwrap()
}

// =============================================================
// parse_line
// =============================================================

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line("").unwrap(), None);
    assert_eq!(parse_line("   \t").unwrap(), None);
    assert_eq!(parse_line("# setup").unwrap(), None);
}

#[test]
fn parse_down_defaults_to_primary() {
    let event = parse_line(r#"{"event":"down","x":1,"y":2}"#).unwrap();
    assert_eq!(event, Some(Event::Down { x: 1.0, y: 2.0, button: Button::Primary }));
}

#[test]
fn parse_unit_and_tagged_events() {
    assert_eq!(parse_line(r#"{"event":"leave"}"#).unwrap(), Some(Event::Leave));
    assert_eq!(parse_line(r#"{"event":"clear_all"}"#).unwrap(), Some(Event::ClearAll));
    assert_eq!(
        parse_line(r#"{"event":"mode","region":3,"mode":"subtract"}"#).unwrap(),
        Some(Event::Mode { region: 3, mode: RegionMode::Subtract })
    );
}

#[test]
fn parse_rejects_unknown_event() {
    assert!(parse_line(r#"{"event":"zoom","factor":2}"#).is_err());
    assert!(parse_line(r#"{"event":"down","x":1}"#).is_err());
    assert!(parse_line("not json").is_err());
}

// =============================================================
// replay
// =============================================================

#[test]
fn replay_draws_triangle() {
    let out = run(
        r#"{"event":"frame","width":100,"height":100}
{"event":"down","x":10,"y":10}
{"event":"down","x":90,"y":10}
{"event":"down","x":90,"y":90}
"#,
    );
    assert_eq!(out.events, 4);
    assert_eq!(out.persists, 3);
    let set = codec::decode(&out.persisted_state().polygon_data, 6);
    assert_eq!(set.get(0).unwrap().len(), 3);
    assert!(set.get(0).unwrap().is_fill_eligible());
}

#[test]
fn replay_frame_shows_image_at_natural_size_by_default() {
    let out = run(r#"{"event":"frame","width":640,"height":480}"#);
    assert_eq!(out.core.viewport.display, Size::new(640.0, 480.0));
}

#[test]
fn replay_display_scales_pointer_input() {
    let out = run(
        r#"{"event":"display","width":100,"height":50}
{"event":"frame","width":200,"height":100}
{"event":"down","x":50,"y":25}
"#,
    );
    assert_eq!(out.core.regions.point(0, 0), Some(Point::new(100.0, 50.0)));
}

#[test]
fn replay_drag_and_delete() {
    let out = run(
        r#"{"event":"frame","width":100,"height":100}
{"event":"select","region":2}
{"event":"down","x":20,"y":20}
{"event":"down","x":60,"y":60}
{"event":"down","x":60,"y":60}
{"event":"move","x":150,"y":-30}
{"event":"up"}
{"event":"down","x":20,"y":20,"button":"secondary"}
"#,
    );
    assert_eq!(out.core.regions.get(2).unwrap().points, vec![Point::new(100.0, 0.0)]);
    assert_eq!(out.persisted_state().active_region, 2);
}

#[test]
fn replay_load_then_mode() {
    let out = run(
        r#"{"event":"load","polygon_data":"[{\"points\":[{\"x\":1,\"y\":1}]}]","active_region":1}
{"event":"mode","region":0,"mode":"subtract"}
"#,
    );
    assert_eq!(out.core.active_region(), 1);
    assert_eq!(out.core.regions.get(0).unwrap().mode, RegionMode::Subtract);
}

#[test]
fn replay_without_frame_ignores_pointer() {
    let out = run(r#"{"event":"down","x":10,"y":10}"#);
    assert!(out.core.regions.has_no_points());
    assert_eq!(out.persists, 0);
}

#[test]
fn replay_reports_bad_line_number() {
    let script = "# header\n{\"event\":\"frame\",\"width\":10,\"height\":10}\n{\"event\":\"bogus\"}\n";
    let err = replay(script.as_bytes(), EditorConfig::default()).err().unwrap();
    assert!(matches!(err, CliError::Script { line: 3, .. }));
    assert!(err.to_string().starts_with("script line 3:"));
}

#[test]
fn replay_single_variant_has_one_region() {
    let script = r#"{"event":"frame","width":10,"height":10}
{"event":"select","region":1}
{"event":"down","x":5,"y":5}
"#;
    let out = replay(script.as_bytes(), EditorConfig::single()).unwrap();
    assert_eq!(out.core.active_region(), 0);
    assert_eq!(out.persisted_state().polygon_data, r#"[{"points":[{"x":5.0,"y":5.0}]}]"#);
}
