use cammeter::persistence::{
    load_state_from_path, save_state_to_path, state_from_json, state_to_json, LineSerde,
    MeterStateSerde,
};
use cammeter::{Calibration, ElementId, MeteringOverlay, OverlayState};

#[test]
fn capture_of_incomplete_overlay_has_no_line() {
    let mut ov = MeteringOverlay::default();
    ov.pointer_down([1.0, 1.0], None);
    let state = MeterStateSerde::capture(&ov, None);
    assert_eq!(state, MeterStateSerde::default());
}

#[test]
fn captured_line_uses_resolved_endpoints() {
    let mut ov = MeteringOverlay::default();
    ov.pointer_down([0.0, 0.0], None);
    ov.pointer_down([10.0, 0.0], None);
    ov.segment_mut().unwrap().set_scale(2.0, 1.0);
    let state = MeterStateSerde::capture(&ov, None);
    assert_eq!(
        state.line,
        Some(LineSerde {
            start: [-5.0, 0.0],
            end: [15.0, 0.0],
        })
    );
}

#[test]
fn state_restores_overlay_and_calibration_from_disk() {
    let mut ov = MeteringOverlay::default();
    ov.pointer_down([10.0, 10.0], None);
    ov.pointer_down([40.0, 50.0], None);
    ov.drag_by(ElementId::Line, [5.0, 5.0]);
    let cal = Calibration::from_reference(50.0, 5.0, "cm").unwrap();
    let state = MeterStateSerde::capture(&ov, Some(&cal));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    save_state_to_path(&state, &path).unwrap();
    let loaded = load_state_from_path(&path).unwrap();
    assert_eq!(loaded, state);

    let mut restored = MeteringOverlay::default();
    loaded.apply_to(&mut restored);
    assert_eq!(restored.state(), OverlayState::Complete);
    let seg = restored.segment().unwrap().points();
    assert_eq!(seg.start(), [15.0, 15.0]);
    assert_eq!(seg.end(), [45.0, 55.0]);
    assert_eq!(restored.length(), Some(50.0));
    assert_eq!(loaded.calibration, Some(cal));
}

#[test]
fn absent_line_clears_overlay() {
    let mut ov = MeteringOverlay::default();
    ov.pointer_down([1.0, 1.0], None);
    MeterStateSerde::default().apply_to(&mut ov);
    assert_eq!(ov.state(), OverlayState::Empty);
}

#[test]
fn json_round_trip_and_errors() {
    let state = MeterStateSerde {
        line: Some(LineSerde {
            start: [1.0, 2.0],
            end: [3.0, 4.0],
        }),
        calibration: None,
    };
    let json = state_to_json(&state).unwrap();
    assert_eq!(state_from_json(&json).unwrap(), state);
    assert_eq!(state_from_json("{}").unwrap(), MeterStateSerde::default());
    assert!(state_from_json("not json").is_err());
}

#[test]
fn loading_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_state_from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn saved_calibration_with_bad_scale_is_rejected() {
    for bad in ["0.0", "-4.0"] {
        let json = format!(r#"{{"calibration":{{"pixels_per_unit":{bad},"unit":"mm"}}}}"#);
        let err = state_from_json(&json).unwrap_err();
        assert!(err.to_string().contains("pixels per unit"), "{err}");
    }
}

#[test]
fn state_file_with_zero_calibration_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"calibration":{"pixels_per_unit":0.0,"unit":"mm"}}"#).unwrap();
    assert!(load_state_from_path(&path).is_err());
}
