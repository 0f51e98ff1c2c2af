use cammeter::{Calibration, MeterError};

#[test]
fn calibration_from_reference_divides_pixels_by_length() {
    let cal = Calibration::from_reference(200.0, 50.0, "mm").unwrap();
    assert_eq!(cal.pixels_per_unit, 4.0);
    assert_eq!(cal.unit, "mm");
    assert_eq!(cal.to_real(100.0), 25.0);
    assert_eq!(cal.format(10.0), "2.500 mm");
}

#[test]
fn blank_unit_defaults_to_millimetres() {
    let cal = Calibration::from_reference(10.0, 1.0, "  ").unwrap();
    assert_eq!(cal.unit, "mm");
}

#[test]
fn non_positive_lengths_are_rejected() {
    for (px, real) in [(0.0, 1.0), (10.0, 0.0), (-5.0, 1.0), (10.0, f64::NAN), (f64::INFINITY, 1.0)] {
        let err = Calibration::from_reference(px, real, "cm").unwrap_err();
        assert!(matches!(err, MeterError::InvalidCalibration(_)), "{px} / {real}");
    }
}

#[test]
fn known_scale_is_validated() {
    assert_eq!(Calibration::new(2.5, "").unwrap().unit, "mm");
    for bad in [0.0, -1.0, f64::INFINITY, f64::NAN] {
        assert!(matches!(
            Calibration::new(bad, "mm"),
            Err(MeterError::InvalidCalibration(_))
        ));
    }
}

#[test]
fn overflowing_ratio_is_rejected() {
    assert!(Calibration::from_reference(f64::MAX, f64::MIN_POSITIVE, "mm").is_err());
}
