use cammeter::data::element::OverlayStyle;
use cammeter::{resolve_line_endpoints, LinePoints, LineTransform, Segment};

fn transform(flip_x: bool, flip_y: bool, sx: f64, sy: f64) -> LineTransform {
    LineTransform {
        offset: [100.0, 50.0],
        scale_x: sx,
        scale_y: sy,
        flip_x,
        flip_y,
    }
}

const LOCAL: LinePoints = LinePoints {
    x1: -10.0,
    y1: -5.0,
    x2: 10.0,
    y2: 5.0,
};

#[test]
fn equal_flips_map_points_straight_through() {
    for flip in [false, true] {
        let r = resolve_line_endpoints(&LOCAL, &transform(flip, flip, 2.0, 3.0));
        assert_eq!(r.start, [100.0 - 20.0, 50.0 - 15.0]);
        assert_eq!(r.end, [100.0 + 20.0, 50.0 + 15.0]);
    }
}

#[test]
fn single_flip_swaps_y_components() {
    let plain = resolve_line_endpoints(&LOCAL, &transform(false, false, 2.0, 3.0));
    for (fx, fy) in [(true, false), (false, true)] {
        let r = resolve_line_endpoints(&LOCAL, &transform(fx, fy, 2.0, 3.0));
        assert_eq!(r.start[0], plain.start[0]);
        assert_eq!(r.end[0], plain.end[0]);
        assert_eq!(r.start[1], plain.end[1]);
        assert_eq!(r.end[1], plain.start[1]);
    }
}

#[test]
fn length_matches_distance_for_all_combinations() {
    for fx in [false, true] {
        for fy in [false, true] {
            for (sx, sy) in [(1.0, 1.0), (2.0, 0.5), (0.25, 4.0)] {
                let r = resolve_line_endpoints(&LOCAL, &transform(fx, fy, sx, sy));
                let d = ((r.end[0] - r.start[0]).powi(2) + (r.end[1] - r.start[1]).powi(2)).sqrt();
                assert!((r.length - d).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn zero_scale_falls_back_to_unscaled() {
    let r = resolve_line_endpoints(&LOCAL, &transform(false, false, 0.0, 0.0));
    assert_eq!(r.start, [90.0, 45.0]);
    assert_eq!(r.end, [110.0, 55.0]);
}

#[test]
fn segment_resolves_to_its_own_endpoints_when_untransformed() {
    let seg = Segment::new([3.0, 4.0], [9.0, 12.0], &OverlayStyle::default());
    let r = seg.resolve();
    assert_eq!(r.start, [3.0, 4.0]);
    assert_eq!(r.end, [9.0, 12.0]);
    assert_eq!(r.length, 10.0);
}

#[test]
fn segment_scale_stretches_about_its_center() {
    let mut seg = Segment::new([0.0, 0.0], [10.0, 0.0], &OverlayStyle::default());
    seg.set_scale(2.0, 1.0);
    let r = seg.resolve();
    assert_eq!(r.start, [-5.0, 0.0]);
    assert_eq!(r.end, [15.0, 0.0]);
}

#[test]
fn setting_endpoints_recentres_the_segment() {
    use cammeter::OverlayShape;
    let mut seg = Segment::new([0.0, 0.0], [10.0, 0.0], &OverlayStyle::default());
    seg.set_position([100.0, 100.0]);
    seg.set_end([20.0, 0.0]);
    assert_eq!(seg.position(), [10.0, 0.0]);
}
