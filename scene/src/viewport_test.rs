#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_sub_is_componentwise() {
    let d = Point::new(28.0, 12.0) - Point::new(5.0, 5.0);
    assert_eq!(d, Point::new(23.0, 7.0));
}

// --- Viewport ---

#[test]
fn default_viewport_is_identity() {
    let vp = Viewport::default();
    let p = Point::new(42.0, -7.5);
    assert_eq!(vp.client_to_room(p), p);
}

#[test]
fn client_to_room_subtracts_origin() {
    let vp = Viewport::new(320.0, 64.0);
    let room = vp.client_to_room(Point::new(350.0, 100.0));
    assert_eq!(room, Point::new(30.0, 36.0));
}
