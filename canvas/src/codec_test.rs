#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn sample_multi() -> RegionSet {
    let mut set = RegionSet::multi();
    set.replace(0, Region { points: vec![pt(1.0, 2.0), pt(3.5, 4.25), pt(10.0, 0.0)], mode: RegionMode::Add });
    set.replace(2, Region { points: vec![pt(7.0, 8.0)], mode: RegionMode::Subtract });
    set.replace(5, Region { points: vec![pt(0.1, 0.2), pt(0.3, 0.4)], mode: RegionMode::Add });
    set
}

// =============================================================
// encode
// =============================================================

#[test]
fn encode_empty_multi_writes_every_slot() {
    let s = encode(&RegionSet::multi());
    let v: Value = serde_json::from_str(&s).unwrap();
    let items = v.as_array().unwrap();
    assert_eq!(items.len(), 6);
    for item in items {
        assert_eq!(item, &serde_json::json!({ "points": [], "mode": "add" }));
    }
}

#[test]
fn encode_multi_includes_mode() {
    let s = encode(&sample_multi());
    let v: Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v[2]["mode"], "subtract");
    assert_eq!(v[0]["points"][1], serde_json::json!({ "x": 3.5, "y": 4.25 }));
}

#[test]
fn encode_single_omits_mode() {
    let mut set = RegionSet::single();
    set.push_point(0, pt(1.0, 1.0));
    let s = encode(&set);
    assert_eq!(s, r#"[{"points":[{"x":1.0,"y":1.0}]}]"#);
}

// =============================================================
// Round-trips
// =============================================================

#[test]
fn decode_encode_restores_multi_set() {
    let set = sample_multi();
    assert_eq!(decode(&encode(&set), 6), set);
}

#[test]
fn encode_decode_is_identity_on_encoded_text() {
    let s = encode(&sample_multi());
    assert_eq!(encode(&decode(&s, 6)), s);
}

#[test]
fn decode_encode_restores_single_set() {
    let mut set = RegionSet::single();
    set.push_point(0, pt(5.0, 6.0));
    set.push_point(0, pt(7.0, 8.0));
    assert_eq!(decode(&encode(&set), 1), set);
}

// =============================================================
// Malformed input
// =============================================================

#[test]
fn decode_not_json_yields_empty_set() {
    let set = decode("not json", 6);
    assert_eq!(set.len(), 6);
    assert!(set.has_no_points());
}

#[test]
fn decode_object_yields_empty_set() {
    let set = decode("{}", 6);
    assert_eq!(set.len(), 6);
    assert!(set.has_no_points());
}

#[test]
fn try_decode_reports_error_kind() {
    let mut set = RegionSet::multi();
    assert!(matches!(try_decode_into("nope", &mut set), Err(CodecError::InvalidJson(_))));
    assert!(matches!(try_decode_into("{}", &mut set), Err(CodecError::NotAnArray)));
    assert!(matches!(try_decode_into("42", &mut set), Err(CodecError::NotAnArray)));
}

#[test]
fn decode_into_leaves_set_untouched_on_failure() {
    let mut set = sample_multi();
    let before = set.clone();
    assert_eq!(decode_into("[[[", &mut set), 0);
    assert_eq!(set, before);
}

#[test]
fn decode_missing_mode_defaults_to_add() {
    let set = decode(r#"[{"points":[{"x":1,"y":2}]}]"#, 6);
    assert_eq!(set.get(0).unwrap().mode, RegionMode::Add);
    assert_eq!(set.point(0, 0), Some(pt(1.0, 2.0)));
}

#[test]
fn decode_unusable_mode_keeps_points() {
    let tri = r#"[{"x":0,"y":0},{"x":10,"y":0},{"x":10,"y":10}]"#;
    let s = format!(
        r#"[{{"points":{tri},"mode":null}},{{"points":{tri},"mode":"ADD"}},{{"points":{tri},"mode":3}},{{"points":{tri},"mode":"subtract"}}]"#
    );
    let mut set = RegionSet::multi();
    assert_eq!(decode_into(&s, &mut set), 4);
    for i in 0..3 {
        assert_eq!(set.get(i).unwrap().len(), 3);
        assert_eq!(set.get(i).unwrap().mode, RegionMode::Add);
    }
    assert_eq!(set.get(3).unwrap().mode, RegionMode::Subtract);
}

#[test]
fn decode_extra_regions_are_ignored() {
    let entries: Vec<String> = (0..9).map(|i| format!(r#"{{"points":[{{"x":{i},"y":0}}]}}"#)).collect();
    let s = format!("[{}]", entries.join(","));
    let mut set = RegionSet::multi();
    assert_eq!(decode_into(&s, &mut set), 6);
    assert_eq!(set.len(), 6);
    assert_eq!(set.point(5, 0), Some(pt(5.0, 0.0)));
}

#[test]
fn decode_truncated_keeps_prior_slots() {
    let mut set = sample_multi();
    let copied = decode_into(r#"[{"points":[]}]"#, &mut set);
    assert_eq!(copied, 1);
    assert!(set.get(0).unwrap().is_empty());
    assert_eq!(set.get(2).unwrap().mode, RegionMode::Subtract);
    assert_eq!(set.get(5).unwrap().len(), 2);
}

#[test]
fn decode_skips_entries_without_points() {
    let mut set = sample_multi();
    let copied = decode_into(r#"[null, {"mode":"subtract"}, {"points":[{"x":9,"y":9}]}]"#, &mut set);
    assert_eq!(copied, 1);
    assert_eq!(set.get(0).unwrap().len(), 3);
    assert_eq!(set.point(2, 0), Some(pt(9.0, 9.0)));
    assert_eq!(set.get(2).unwrap().mode, RegionMode::Add);
}

#[test]
fn decode_skips_entry_with_bad_point() {
    let set = decode(r#"[{"points":[{"x":"a","y":1}]}, {"points":[{"x":1,"y":1}]}]"#, 6);
    assert!(set.get(0).unwrap().is_empty());
    assert_eq!(set.point(1, 0), Some(pt(1.0, 1.0)));
}

#[test]
fn decode_single_forces_add_mode() {
    let set = decode(r#"[{"points":[{"x":1,"y":1}],"mode":"subtract"}]"#, 1);
    assert_eq!(set.get(0).unwrap().mode, RegionMode::Add);
}

// =============================================================
// Legacy single-region point list
// =============================================================

#[test]
fn decode_single_accepts_bare_point_list() {
    let set = decode(r#"[{"x":1,"y":2},{"x":3,"y":4}]"#, 1);
    assert_eq!(set.get(0).unwrap().points, vec![pt(1.0, 2.0), pt(3.0, 4.0)]);
}

#[test]
fn decode_multi_ignores_bare_point_list() {
    let set = decode(r#"[{"x":1,"y":2},{"x":3,"y":4}]"#, 6);
    assert!(set.has_no_points());
}

// =============================================================
// PersistedState
// =============================================================

#[test]
fn persisted_state_defaults() {
    let state: PersistedState = serde_json::from_str("{}").unwrap();
    assert_eq!(state.polygon_data, "[]");
    assert_eq!(state.active_region, 0);
}
