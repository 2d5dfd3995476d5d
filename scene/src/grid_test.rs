#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn snap_rounds_to_nearest_cell() {
    assert_eq!(snap(23.0), 20.0);
    assert_eq!(snap(7.0), 0.0);
    assert_eq!(snap(31.0), 40.0);
    assert_eq!(snap(-12.0), -20.0);
}

#[test]
fn snap_keeps_exact_multiples() {
    for v in [-60.0, -20.0, 0.0, 20.0, 40.0, 600.0] {
        assert_eq!(snap(v), v);
    }
}

#[test]
fn snap_is_idempotent() {
    let mut v = -97.3;
    while v < 97.3 {
        let once = snap(v);
        assert_eq!(snap(once), once, "snap not idempotent at {v}");
        v += 1.7;
    }
}

#[test]
fn snap_never_returns_negative_zero() {
    let s = snap(-4.0);
    assert_eq!(s, 0.0);
    assert!(s.is_sign_positive());
}

#[test]
fn snap_point_snaps_both_axes() {
    let p = snap_point(Point::new(23.0, 7.0));
    assert_eq!(p, Point::new(20.0, 0.0));
}

#[test]
fn ties_round_toward_positive_infinity() {
    assert_eq!(snap(10.0), 20.0);
    assert_eq!(snap(30.0), 40.0);
    assert_eq!(snap(-10.0), 0.0);
    assert!(snap(-10.0).is_sign_positive());
    assert_eq!(snap(-30.0), -20.0);
    assert_eq!(snap(-50.0), -40.0);
}
