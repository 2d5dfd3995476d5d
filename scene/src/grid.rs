//! Grid math for plan view.
//!
//! Every coordinate derived from pointer input passes through [`snap`] before
//! it is stored.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::GRID_PITCH;
use crate::viewport::Point;

/// Round `value` to the nearest multiple of [`GRID_PITCH`].
///
/// Ties round toward positive infinity, so `-10` snaps to `0` and `-30` to
/// `-20`, matching browser `Math.round`.
#[must_use]
pub fn snap(value: f64) -> f64 {
    // Adding +0.0 turns a -0.0 result into plain 0.
    ((value / GRID_PITCH) + 0.5).floor() * GRID_PITCH + 0.0
}

/// Snap both axes of a point.
#[must_use]
pub fn snap_point(pt: Point) -> Point {
    Point::new(snap(pt.x), snap(pt.y))
}
