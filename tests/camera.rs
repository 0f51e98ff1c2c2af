use cammeter::data::camera::{downscale, save_png};
use cammeter::FrameSource;
use cammeter::{CameraDevice, CameraRig, DeviceProvider, MeterError, TestPatternProvider};

fn rig(count: usize) -> CameraRig {
    CameraRig::open_all(&TestPatternProvider::new(count, 8, 4)).unwrap()
}

#[test]
fn every_device_becomes_a_thumbnail_and_first_is_main() {
    let mut rig = rig(3);
    assert_eq!(rig.devices().count(), 3);
    assert_eq!(rig.main_device().id, "pattern-0");
    assert!(rig.main_frame().is_none());

    rig.poll();
    assert!(rig.thumbnails().all(|(_, frame)| frame.is_some()));
    assert_eq!(rig.main_frame().unwrap().size, [8, 4]);
}

#[test]
fn empty_provider_fails_with_no_cameras() {
    let err = CameraRig::open_all(&TestPatternProvider::new(0, 8, 4)).err().unwrap();
    assert!(matches!(err, MeterError::NoCameras));
}

#[test]
fn selecting_unknown_device_is_an_error() {
    let mut rig = rig(2);
    let err = rig.select_main("nope").unwrap_err();
    assert!(matches!(err, MeterError::UnknownDevice(id) if id == "nope"));
    assert_eq!(rig.main_device().id, "pattern-0");
}

#[test]
fn selecting_a_camera_switches_main_and_resumes() {
    let mut rig = rig(2);
    rig.poll();
    rig.set_paused(true);
    rig.select_main("pattern-1").unwrap();
    assert_eq!(rig.main_device().id, "pattern-1");
    assert!(!rig.is_paused());
}

#[test]
fn paused_main_frame_stays_frozen() {
    // wide enough that the moving bar does not wrap within a few frames
    let mut rig = CameraRig::open_all(&TestPatternProvider::new(1, 64, 4)).unwrap();
    rig.poll();
    assert!(rig.toggle_pause());
    let frozen = rig.snapshot().unwrap();
    rig.poll();
    rig.poll();
    assert_eq!(rig.main_frame().unwrap().pixels, frozen.pixels);
    let live = rig.thumbnails().next().unwrap().1.unwrap().clone();
    assert_ne!(live.pixels, frozen.pixels);

    assert!(!rig.toggle_pause());
    rig.poll();
    assert_ne!(rig.main_frame().unwrap().pixels, frozen.pixels);
}

#[test]
fn opening_foreign_device_fails() {
    let provider = TestPatternProvider::new(1, 8, 4);
    let foreign = CameraDevice {
        id: "usb-7".to_string(),
        label: "USB".to_string(),
    };
    assert!(matches!(provider.open(&foreign), Err(MeterError::UnknownDevice(_))));
}

#[test]
fn snapshot_is_written_as_png() {
    let mut rig = rig(1);
    rig.poll();
    let frame = rig.snapshot().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CanvasAsImage.png");
    save_png(&frame, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn pattern_bar_moves_over_a_fixed_gradient() {
    let provider = TestPatternProvider::new(1, 32, 2);
    let device = provider.enumerate().unwrap().remove(0);
    let mut source = provider.open(&device).unwrap();
    let first = source.next_frame().unwrap();
    let second = source.next_frame().unwrap();
    // bar sits on columns 0..=2 first, then 2..=6
    assert_eq!(first.pixels[0], egui::Color32::WHITE);
    assert_ne!(second.pixels[0], egui::Color32::WHITE);
    assert_eq!(second.pixels[4], egui::Color32::WHITE);
    // away from both bars the gradient is unchanged
    assert_eq!(first.pixels[20], second.pixels[20]);
    assert_eq!(first.pixels[32 + 20], second.pixels[32 + 20]);
}

#[test]
fn thumbnails_are_downscaled_to_the_strip_width() {
    let mut rig = CameraRig::open_all(&TestPatternProvider::new(1, 1280, 720)).unwrap();
    rig.poll();
    let frame = rig.main_frame().unwrap();
    let thumb = downscale(frame, 200);
    assert_eq!(thumb.size, [200, 112]);
    assert_eq!(thumb.pixels.len(), 200 * 112);
    assert_eq!(thumb.pixels[0], frame.pixels[0]);

    let small = downscale(&thumb, 400);
    assert_eq!(small.size, thumb.size);
}
