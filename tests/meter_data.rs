use cammeter::data::data::MeterData;
use cammeter::{
    Calibration, CameraRig, ElementId, EventFilter, EventKind, MeteringOverlay, PointRole,
    TestPatternProvider,
};

fn data() -> MeterData {
    let rig = CameraRig::open_all(&TestPatternProvider::new(1, 8, 4)).unwrap();
    MeterData::new(rig, MeteringOverlay::default())
}

#[test]
fn overlay_changes_reach_subscribers_as_events() {
    let mut d = data();
    let rx = d.events.subscribe(EventFilter::only(
        EventKind::MEASUREMENT_POINT | EventKind::MEASUREMENT_COMPLETE,
    ));

    let first = d.overlay.pointer_down([0.0, 0.0], None);
    d.publish_changes(first);
    let second = d.overlay.pointer_down([3.0, 4.0], None);
    d.publish_changes(second);

    let evt = rx.try_recv().unwrap();
    assert_eq!(evt.kinds, EventKind::MEASUREMENT_POINT);
    assert_eq!(evt.measurement.unwrap().role, Some(PointRole::First));

    let evt = rx.try_recv().unwrap();
    assert!(evt.kinds.contains(EventKind::MEASUREMENT_COMPLETE));
    assert_eq!(evt.measurement.unwrap().length, Some(5.0));
    assert!(rx.try_recv().is_err());
}

#[test]
fn moves_and_clears_are_published() {
    let mut d = data();
    let rx = d.events.subscribe_all();
    d.overlay.pointer_down([0.0, 0.0], None);
    d.overlay.pointer_down([10.0, 0.0], None);

    let moved = d.overlay.drag(ElementId::Point(PointRole::Second), [20.0, 0.0]);
    d.publish_changes(moved);
    d.clear_overlay();

    let evt = rx.try_recv().unwrap();
    assert_eq!(evt.kinds, EventKind::MEASUREMENT_MOVED);
    assert_eq!(evt.measurement.unwrap().end, Some([20.0, 0.0]));
    assert_eq!(rx.try_recv().unwrap().kinds, EventKind::MEASUREMENT_CLEARED);
    assert!(d.overlay.segment().is_none());
}

#[test]
fn pause_emits_once_per_transition() {
    let mut d = data();
    let rx = d.events.subscribe(EventFilter::only(EventKind::PAUSE | EventKind::RESUME));
    d.set_paused(true);
    d.set_paused(true);
    d.toggle_pause();
    assert_eq!(rx.try_recv().unwrap().kinds, EventKind::PAUSE);
    assert_eq!(rx.try_recv().unwrap().kinds, EventKind::RESUME);
    assert!(rx.try_recv().is_err());
    assert!(!d.rig.is_paused());
}

#[test]
fn length_text_uses_calibration_when_present() {
    let mut d = data();
    assert_eq!(d.length_text(), None);
    d.overlay.pointer_down([0.0, 0.0], None);
    d.overlay.pointer_down([30.0, 40.0], None);
    assert_eq!(d.length_text().as_deref(), Some("50.0 px"));

    let rx = d.events.subscribe(EventFilter::only(EventKind::CALIBRATED));
    d.set_calibration(Calibration::from_reference(50.0, 10.0, "mm").unwrap());
    assert_eq!(d.length_text().as_deref(), Some("10.000 mm (50.0 px)"));
    assert_eq!(rx.try_recv().unwrap().calibration.unwrap().unit, "mm");
}
