use cammeter::controllers::StreamRequests;
use cammeter::StreamController;

#[test]
fn take_requests_drains_the_queue() {
    let ctrl = StreamController::new();
    ctrl.pause();
    ctrl.request_snapshot_to_path("/tmp/shot.png");
    ctrl.select_camera("pattern-1");
    ctrl.clear_overlay();

    let req = ctrl.take_requests();
    assert_eq!(req.pause, Some(true));
    assert!(!req.snapshot);
    assert_eq!(req.snapshot_to, Some("/tmp/shot.png".into()));
    assert_eq!(req.select.as_deref(), Some("pattern-1"));
    assert!(req.clear_overlay);

    assert_eq!(ctrl.take_requests(), StreamRequests::default());
}

#[test]
fn latest_pause_request_wins_across_clones() {
    let ctrl = StreamController::new();
    let other = ctrl.clone();
    ctrl.pause();
    other.resume();
    other.request_snapshot();
    let req = ctrl.take_requests();
    assert_eq!(req.pause, Some(false));
    assert!(req.snapshot);
}
